//! Aggregates behind every dashboard widget.
//!
//! [`render`] rebuilds a complete [`DashboardView`] from a record slice.
//! Nothing is patched in place: each call throws the previous view away.

use crate::formatters::{format_currency, format_fixed, format_number, format_percent};
use crate::generator::RecordGenerator;
use crate::models::{Choice, ClassLevel, Gender, StudentRecord, Subject};
use crate::table::{table_rows, TableRow};
use clap::ValueEnum;
use serde::Serialize;

/// Scatter plot uses the first this-many records, not a sample.
pub const SCATTER_LIMIT: usize = 100;
pub const TOP_STUDENT_COUNT: usize = 10;

/// Offsets from the mean percentage for the four trend points.
const TREND_POINTS: [(&str, f64); 4] = [
    ("Unit Test 1", -8.0),
    ("Unit Test 2", -4.0),
    ("Mid Term", 0.0),
    ("Final", 3.0),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_students: usize,
    pub avg_percentage: f64,
    pub pass_rate: f64,
    pub avg_attendance: f64,
    pub fees_collected: f64,
    pub fees_pending: f64,
}

impl Kpis {
    pub fn from_records(records: &[StudentRecord]) -> Self {
        let n = records.len();
        if n == 0 {
            return Self::default();
        }

        let pct_sum: u64 = records.iter().map(|r| r.percentage as u64).sum();
        let att_sum: u64 = records.iter().map(|r| r.attendance as u64).sum();
        let passed = records.iter().filter(|r| r.is_pass()).count();

        Self {
            total_students: n,
            avg_percentage: pct_sum as f64 / n as f64,
            pass_rate: passed as f64 / n as f64 * 100.0,
            avg_attendance: att_sum as f64 / n as f64,
            fees_collected: records.iter().map(|r| r.fees_paid).sum(),
            fees_pending: records.iter().map(|r| r.fees_pending).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_students == 0
    }

    pub fn total_display(&self) -> String {
        format_number(self.total_students as u64)
    }

    pub fn avg_percentage_display(&self) -> String {
        self.ratio_display(self.avg_percentage)
    }

    pub fn pass_rate_display(&self) -> String {
        self.ratio_display(self.pass_rate)
    }

    pub fn avg_attendance_display(&self) -> String {
        self.ratio_display(self.avg_attendance)
    }

    pub fn fees_collected_display(&self) -> String {
        format_currency(self.fees_collected)
    }

    pub fn fees_pending_display(&self) -> String {
        format_currency(self.fees_pending)
    }

    // An empty view shows a bare "0%" rather than "0.0%".
    fn ratio_display(&self, value: f64) -> String {
        if self.is_empty() {
            "0%".to_string()
        } else {
            format_percent(value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAverage {
    pub subject: Subject,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GenderSplit {
    pub male: usize,
    pub female: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassFees {
    pub class: ClassLevel,
    pub paid_millions: f64,
    pub pending_millions: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub attendance: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PassFail {
    pub pass: usize,
    pub fail: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStudent {
    pub id: String,
    pub name: String,
    pub percentage: u32,
}

/// Where heatmap cell values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatmapMode {
    /// Mean overall percentage of each class, repeated across subjects.
    /// Records hold no per-subject marks.
    #[default]
    ClassAverage,
    /// Independent random value in [40, 94] per cell on every render.
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeatBand {
    High,
    Medium,
    Low,
}

impl HeatBand {
    pub fn for_value(value: u32) -> Self {
        if value > 75 {
            HeatBand::High
        } else if value > 50 {
            HeatBand::Medium
        } else {
            HeatBand::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub class: ClassLevel,
    pub subject: Subject,
    pub value: u32,
    pub band: HeatBand,
}

impl HeatmapCell {
    fn new(class: ClassLevel, subject: Subject, value: u32) -> Self {
        Self {
            class,
            subject,
            value,
            band: HeatBand::for_value(value),
        }
    }

    /// Color strength in [0, 1]; values at or below 30 are fully faded.
    pub fn intensity(&self) -> f64 {
        ((self.value as f64 - 30.0) / 70.0).clamp(0.0, 1.0)
    }

    pub fn tooltip(&self) -> String {
        format!("{} - {}: {}%", self.class, self.subject, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub mode: HeatmapMode,
    /// Row-major: classes in order, subjects in order within each class.
    pub cells: Vec<HeatmapCell>,
}

impl Heatmap {
    pub fn build(records: &[StudentRecord], mode: HeatmapMode, generator: &mut RecordGenerator) -> Self {
        let mut cells = Vec::with_capacity(ClassLevel::VARIANTS.len() * Subject::VARIANTS.len());
        for &class in ClassLevel::VARIANTS {
            let class_avg = match mode {
                HeatmapMode::ClassAverage => class_average(records, class),
                HeatmapMode::Placeholder => 0,
            };
            for &subject in Subject::VARIANTS {
                let value = match mode {
                    HeatmapMode::ClassAverage => class_avg,
                    HeatmapMode::Placeholder => generator.placeholder_cell(),
                };
                cells.push(HeatmapCell::new(class, subject, value));
            }
        }
        Self { mode, cells }
    }

    pub fn rows(&self) -> Vec<(ClassLevel, &[HeatmapCell])> {
        self.cells
            .chunks(Subject::VARIANTS.len())
            .filter_map(|chunk| chunk.first().map(|c| (c.class, chunk)))
            .collect()
    }

    pub fn cell(&self, class: ClassLevel, subject: Subject) -> Option<&HeatmapCell> {
        self.cells
            .iter()
            .find(|c| c.class == class && c.subject == subject)
    }
}

fn class_average(records: &[StudentRecord], class: ClassLevel) -> u32 {
    let (sum, count) = records
        .iter()
        .filter(|r| r.class == class)
        .fold((0u64, 0u64), |(s, c), r| (s + r.percentage as u64, c + 1));
    if count == 0 {
        0
    } else {
        (sum as f64 / count as f64).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub kpis: Kpis,
    pub subject_averages: Vec<SubjectAverage>,
    pub trend: Vec<TrendPoint>,
    pub gender: GenderSplit,
    pub fees_by_class: Vec<ClassFees>,
    pub scatter: Vec<ScatterPoint>,
    pub pass_fail: PassFail,
    pub top_students: Vec<RankedStudent>,
    pub heatmap: Heatmap,
    pub table: Vec<TableRow>,
}

/// Recompute every widget's data for `records`.
pub fn render(records: &[StudentRecord], heatmap: HeatmapMode, generator: &mut RecordGenerator) -> DashboardView {
    let kpis = Kpis::from_records(records);
    DashboardView {
        subject_averages: subject_averages(records),
        trend: trend(&kpis),
        gender: gender_split(records),
        fees_by_class: fees_by_class(records),
        scatter: scatter(records),
        pass_fail: pass_fail(records),
        top_students: top_students(records, TOP_STUDENT_COUNT),
        heatmap: Heatmap::build(records, heatmap, generator),
        table: table_rows(records),
        kpis,
    }
}

/// Illustrative per-subject bars: every subject gets the same value,
/// derived from how many students scored above 50.
pub fn subject_averages(records: &[StudentRecord]) -> Vec<SubjectAverage> {
    let above_50 = records.iter().filter(|r| r.percentage > 50).count() as u32;
    Subject::VARIANTS
        .iter()
        .map(|&subject| SubjectAverage {
            subject,
            value: 65 + above_50 % 30,
        })
        .collect()
}

/// Four illustrative points offset from the mean; not historical data.
pub fn trend(kpis: &Kpis) -> Vec<TrendPoint> {
    // The mean is taken at display precision so the Mid Term point matches the KPI card.
    let base: f64 = if kpis.is_empty() {
        0.0
    } else {
        format_fixed(kpis.avg_percentage, 1).parse().unwrap_or(kpis.avg_percentage)
    };
    TREND_POINTS
        .iter()
        .map(|&(label, delta)| TrendPoint {
            label,
            value: base + delta,
        })
        .collect()
}

pub fn gender_split(records: &[StudentRecord]) -> GenderSplit {
    let male = records.iter().filter(|r| r.gender == Gender::Male).count();
    GenderSplit {
        male,
        female: records.len() - male,
    }
}

pub fn fees_by_class(records: &[StudentRecord]) -> Vec<ClassFees> {
    ClassLevel::VARIANTS
        .iter()
        .map(|&class| {
            let (paid, pending) = records
                .iter()
                .filter(|r| r.class == class)
                .fold((0.0, 0.0), |(p, q), r| (p + r.fees_paid, q + r.fees_pending));
            ClassFees {
                class,
                paid_millions: paid / 1_000_000.0,
                pending_millions: pending / 1_000_000.0,
            }
        })
        .collect()
}

pub fn scatter(records: &[StudentRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .take(SCATTER_LIMIT)
        .map(|r| ScatterPoint {
            attendance: r.attendance,
            percentage: r.percentage,
        })
        .collect()
}

pub fn pass_fail(records: &[StudentRecord]) -> PassFail {
    let pass = records.iter().filter(|r| r.is_pass()).count();
    PassFail {
        pass,
        fail: records.len() - pass,
    }
}

/// Highest percentages first; equal percentages keep their input order.
pub fn top_students(records: &[StudentRecord], limit: usize) -> Vec<RankedStudent> {
    let mut ranked: Vec<&StudentRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    ranked
        .into_iter()
        .take(limit)
        .map(|r| RankedStudent {
            id: r.id.clone(),
            name: r.name.clone(),
            percentage: r.percentage,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AcademicYear, FeeStatus, Section};

    fn record(n: usize, class: ClassLevel, gender: Gender, percentage: u32, attendance: u32) -> StudentRecord {
        let total = class.total_fees();
        StudentRecord {
            id: format!("STU{}", 1000 + n),
            name: format!("Student {}", n),
            gender,
            class,
            section: Section::A,
            year: AcademicYear::Y2024,
            attendance,
            percentage,
            total_fees: total,
            fees_paid: total / 2.0,
            fees_pending: total / 2.0,
            fee_status: FeeStatus::Pending,
        }
    }

    #[test]
    fn test_kpis() {
        let records = vec![
            record(1, ClassLevel::Tenth, Gender::Male, 30, 60),
            record(2, ClassLevel::Tenth, Gender::Female, 50, 70),
            record(3, ClassLevel::Twelfth, Gender::Female, 71, 91),
        ];
        let k = Kpis::from_records(&records);
        assert_eq!(k.total_display(), "3");
        assert_eq!(k.avg_percentage_display(), "50.3%");
        assert_eq!(k.pass_rate_display(), "66.7%");
        assert_eq!(k.avg_attendance_display(), "73.7%");
        // 22.5K + 22.5K + 32.5K
        assert_eq!(k.fees_collected_display(), "₹78K");
        assert_eq!(k.fees_pending_display(), "₹78K");
    }

    #[test]
    fn test_empty_view_renders_zeroes() {
        let mut generator = RecordGenerator::new(0);
        let view = render(&[], HeatmapMode::ClassAverage, &mut generator);
        assert_eq!(view.kpis.total_display(), "0");
        assert_eq!(view.kpis.avg_percentage_display(), "0%");
        assert_eq!(view.kpis.pass_rate_display(), "0%");
        assert_eq!(view.kpis.avg_attendance_display(), "0%");
        assert_eq!(view.kpis.fees_collected_display(), "₹0");
        assert_eq!(view.pass_fail, PassFail { pass: 0, fail: 0 });
        assert!(view.top_students.is_empty());
        assert!(view.scatter.is_empty());
        assert!(view.table.is_empty());
        let trend: Vec<f64> = view.trend.iter().map(|p| p.value).collect();
        assert_eq!(trend, vec![-8.0, -4.0, 0.0, 3.0]);
        assert!(view.heatmap.cells.iter().all(|c| c.value == 0));
    }

    #[test]
    fn test_trend_offsets() {
        let records = vec![
            record(1, ClassLevel::Tenth, Gender::Male, 60, 80),
            record(2, ClassLevel::Tenth, Gender::Male, 70, 80),
        ];
        let points = trend(&Kpis::from_records(&records));
        let labels: Vec<_> = points.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["Unit Test 1", "Unit Test 2", "Mid Term", "Final"]);
        let values: Vec<_> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![57.0, 61.0, 65.0, 68.0]);
    }

    #[test]
    fn test_subject_averages_track_count_above_50() {
        let mut records = Vec::new();
        for n in 0..35 {
            records.push(record(n, ClassLevel::Eleventh, Gender::Male, 80, 90));
        }
        records.push(record(99, ClassLevel::Eleventh, Gender::Male, 50, 90));
        let bars = subject_averages(&records);
        assert_eq!(bars.len(), 4);
        // 35 above 50 -> 65 + 5
        assert!(bars.iter().all(|b| b.value == 70));
        assert_eq!(bars[3].subject, Subject::SocialStudies);
    }

    #[test]
    fn test_donuts_and_fee_tiers() {
        let records = vec![
            record(1, ClassLevel::Tenth, Gender::Male, 39, 60),
            record(2, ClassLevel::Tenth, Gender::Female, 40, 70),
            record(3, ClassLevel::Twelfth, Gender::Female, 90, 91),
        ];
        assert_eq!(gender_split(&records), GenderSplit { male: 1, female: 2 });
        assert_eq!(pass_fail(&records), PassFail { pass: 2, fail: 1 });

        let fees = fees_by_class(&records);
        assert_eq!(fees[0].class, ClassLevel::Tenth);
        assert!((fees[0].paid_millions - 0.045).abs() < 1e-9);
        assert_eq!(fees[1].paid_millions, 0.0);
        assert!((fees[2].pending_millions - 0.0325).abs() < 1e-9);
    }

    #[test]
    fn test_scatter_is_positional_truncation() {
        let records = RecordGenerator::new(2).generate();
        let points = scatter(&records);
        assert_eq!(points.len(), SCATTER_LIMIT);
        assert_eq!(points[0].attendance, records[0].attendance);
        assert_eq!(points[99].percentage, records[99].percentage);
    }

    #[test]
    fn test_top_students_stable_descending() {
        let records = vec![
            record(1, ClassLevel::Tenth, Gender::Male, 70, 60),
            record(2, ClassLevel::Tenth, Gender::Male, 90, 60),
            record(3, ClassLevel::Tenth, Gender::Male, 70, 60),
            record(4, ClassLevel::Tenth, Gender::Male, 95, 60),
        ];
        let top: Vec<_> = top_students(&records, 10).into_iter().map(|s| s.id).collect();
        assert_eq!(top, vec!["STU1004", "STU1002", "STU1001", "STU1003"]);

        let full = RecordGenerator::new(8).generate();
        let top = top_students(&full, TOP_STUDENT_COUNT);
        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].percentage >= w[1].percentage));
    }

    #[test]
    fn test_heatmap_class_average_is_deterministic() {
        let records = vec![
            record(1, ClassLevel::Tenth, Gender::Male, 60, 60),
            record(2, ClassLevel::Tenth, Gender::Male, 81, 60),
            record(3, ClassLevel::Twelfth, Gender::Male, 45, 60),
        ];
        let mut generator = RecordGenerator::new(1);
        let a = Heatmap::build(&records, HeatmapMode::ClassAverage, &mut generator);
        let b = Heatmap::build(&records, HeatmapMode::ClassAverage, &mut generator);
        assert_eq!(a, b);
        assert_eq!(a.cells.len(), 12);

        let cell = a.cell(ClassLevel::Tenth, Subject::Science).unwrap();
        assert_eq!(cell.value, 71);
        assert_eq!(cell.band, HeatBand::Medium);
        assert_eq!(cell.tooltip(), "10th - Science: 71%");
        assert_eq!(a.cell(ClassLevel::Eleventh, Subject::English).unwrap().value, 0);
        assert_eq!(a.cell(ClassLevel::Twelfth, Subject::English).unwrap().band, HeatBand::Low);

        let rows = a.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].0, ClassLevel::Eleventh);
        assert_eq!(rows[1].1.len(), 4);
    }

    #[test]
    fn test_heatmap_placeholder_range() {
        let mut generator = RecordGenerator::new(4);
        let map = Heatmap::build(&[], HeatmapMode::Placeholder, &mut generator);
        assert!(map.cells.iter().all(|c| (40..=94).contains(&c.value)));
    }

    #[test]
    fn test_heatmap_placeholder_rerolls_each_render() {
        let mut generator = RecordGenerator::new(4);
        let first = Heatmap::build(&[], HeatmapMode::Placeholder, &mut generator);
        let second = Heatmap::build(&[], HeatmapMode::Placeholder, &mut generator);
        let a: Vec<u32> = first.cells.iter().map(|c| c.value).collect();
        let b: Vec<u32> = second.cells.iter().map(|c| c.value).collect();
        assert_ne!(a, b);

        // Same seed, same sequence of renders.
        let mut replay = RecordGenerator::new(4);
        let again = Heatmap::build(&[], HeatmapMode::Placeholder, &mut replay);
        assert_eq!(again, first);
    }

    #[test]
    fn test_trend_base_uses_stored_mean() {
        // 20 students summing to 1441: mean 72.05 is stored just below the half.
        let mut records: Vec<_> = (0..19)
            .map(|n| record(n, ClassLevel::Tenth, Gender::Male, 72, 80))
            .collect();
        records.push(record(19, ClassLevel::Tenth, Gender::Male, 73, 80));
        let kpis = Kpis::from_records(&records);
        assert_eq!(kpis.avg_percentage_display(), "72.0%");

        let mid_term = trend(&kpis)[2].value;
        assert_eq!(mid_term, 72.0);
    }

    #[test]
    fn test_heat_intensity() {
        let cell = HeatmapCell::new(ClassLevel::Tenth, Subject::English, 100);
        assert_eq!(cell.intensity(), 1.0);
        assert_eq!(cell.band, HeatBand::High);
        let cell = HeatmapCell::new(ClassLevel::Tenth, Subject::English, 65);
        assert!((cell.intensity() - 0.5).abs() < 1e-9);
    }
}
