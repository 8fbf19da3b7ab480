use crate::models::{Choice, FeeStatus, Subject};
use crate::stats::DashboardView;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const CURRENCY_SYMBOL: &str = "₹";

/// True when the stored value of `value` sits exactly halfway between two
/// `decimals`-place neighbours. The product is checked for exactness, so
/// 1441/20 (stored just under 72.05) is not a tie even though
/// `value * 10.0` rounds to 720.5.
fn is_exact_tie(value: f64, decimals: usize) -> bool {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    scaled.fract() == 0.5 && value.mul_add(factor, -scaled) == 0.0
}

/// Fixed-point text of the stored value, the way a browser's `toFixed`
/// prints it: correctly rounded, with exact halves going away from zero
/// (2.5 -> "3"). `format!("{:.*}")` alone rounds exact halves to even.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() || !is_exact_tie(value.abs(), decimals) {
        return format!("{:.*}", decimals, value);
    }

    let factor = 10f64.powi(decimals as i32);
    let up = (value.abs() * factor).ceil() / factor;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{:.*}", sign, decimals, up)
}

/// Compact currency: millions with one decimal, thousands with none,
/// anything smaller unscaled.
pub fn format_currency(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{}{}M", CURRENCY_SYMBOL, format_fixed(value / 1_000_000.0, 1))
    } else if value >= 1_000.0 {
        format!("{}{}K", CURRENCY_SYMBOL, format_fixed(value / 1_000.0, 0))
    } else {
        format!("{}{}", CURRENCY_SYMBOL, value)
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_fixed(value, 1))
}

pub fn format_number(num: u64) -> String {
    let num_str = num.to_string();
    let mut result = String::new();
    let mut count = 0;

    for ch in num_str.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

/// Cut `s` to at most `max_width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn kpi_rows(view: &DashboardView) -> Vec<(&'static str, String)> {
    let k = &view.kpis;
    vec![
        ("Total Students", k.total_display()),
        ("Average Percentage", k.avg_percentage_display()),
        ("Pass Rate", k.pass_rate_display()),
        ("Average Attendance", k.avg_attendance_display()),
        ("Fees Collected", k.fees_collected_display()),
        ("Fees Pending", k.fees_pending_display()),
    ]
}

pub fn format_summary_table(view: &DashboardView, detailed: bool) -> String {
    let mut out = String::new();

    let mut kpis = Table::new();
    kpis.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    kpis.set_titles(Row::new(vec![
        Cell::new("Metric").style_spec("bFc"),
        Cell::new("Value").style_spec("bFc"),
    ]));
    for (label, value) in kpi_rows(view) {
        kpis.add_row(Row::new(vec![Cell::new(label), Cell::new(&value).style_spec("Fg")]));
    }
    out.push_str(&kpis.to_string());

    let mut students = Table::new();
    students.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    students.set_titles(Row::new(vec![
        Cell::new("ID").style_spec("bFc"),
        Cell::new("Name").style_spec("bFc"),
        Cell::new("Class").style_spec("bFc"),
        Cell::new("Attendance").style_spec("bFc"),
        Cell::new("Score").style_spec("bFc"),
        Cell::new("Result").style_spec("bFc"),
        Cell::new("Fees").style_spec("bFc"),
    ]));
    for row in &view.table {
        let result_style = if row.result.passed { "Fg" } else { "Fr" };
        let fee_style = match row.fee_status {
            FeeStatus::Paid => "Fg",
            FeeStatus::Pending => "Fy",
        };
        students.add_row(Row::new(vec![
            Cell::new(&row.id_label),
            Cell::new(&row.name),
            Cell::new(&row.class_section),
            Cell::new(&row.attendance),
            Cell::new(&row.score),
            Cell::new(&row.result.text).style_spec(result_style),
            Cell::new(row.fee_status.label()).style_spec(fee_style),
        ]));
    }
    out.push('\n');
    out.push_str(&students.to_string());

    if detailed {
        let mut top = Table::new();
        top.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        top.set_titles(Row::new(vec![
            Cell::new("Rank").style_spec("bFc"),
            Cell::new("Top Student").style_spec("bFc"),
            Cell::new("Percentage").style_spec("bFc"),
        ]));
        for (i, s) in view.top_students.iter().enumerate() {
            top.add_row(Row::new(vec![
                Cell::new(&(i + 1).to_string()),
                Cell::new(&s.name),
                Cell::new(&format!("{}%", s.percentage)),
            ]));
        }
        out.push('\n');
        out.push_str(&top.to_string());

        let mut fees = Table::new();
        fees.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        fees.set_titles(Row::new(vec![
            Cell::new("Class").style_spec("bFc"),
            Cell::new("Paid (M)").style_spec("bFc"),
            Cell::new("Pending (M)").style_spec("bFc"),
        ]));
        for c in &view.fees_by_class {
            fees.add_row(Row::new(vec![
                Cell::new(c.class.label()),
                Cell::new(&format_fixed(c.paid_millions, 2)).style_spec("Fg"),
                Cell::new(&format_fixed(c.pending_millions, 2)).style_spec("Fr"),
            ]));
        }
        out.push('\n');
        out.push_str(&fees.to_string());

        let mut heat = Table::new();
        heat.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        let mut titles = vec![Cell::new("Class").style_spec("bFc")];
        titles.extend(Subject::VARIANTS.iter().map(|s| Cell::new(s.label()).style_spec("bFc")));
        heat.set_titles(Row::new(titles));
        for (class, cells) in view.heatmap.rows() {
            let mut row = vec![Cell::new(class.label())];
            row.extend(cells.iter().map(|c| Cell::new(&c.value.to_string())));
            heat.add_row(Row::new(row));
        }
        out.push('\n');
        out.push_str(&heat.to_string());
    }

    out
}

pub fn format_summary_markdown(view: &DashboardView, detailed: bool) -> String {
    let mut md = String::new();

    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    for (label, value) in kpi_rows(view) {
        md.push_str(&format!("| {} | {} |\n", label, value));
    }

    md.push_str("\n| ID | Name | Class | Attendance | Score | Result | Fees |\n");
    md.push_str("|----|------|-------|------------|-------|--------|------|\n");
    for row in &view.table {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            row.id_label,
            row.name,
            row.class_section,
            row.attendance,
            row.score,
            row.result.text,
            row.fee_status
        ));
    }

    if detailed {
        md.push_str("\n| Rank | Top Student | Percentage |\n");
        md.push_str("|------|-------------|------------|\n");
        for (i, s) in view.top_students.iter().enumerate() {
            md.push_str(&format!("| {} | {} | {}% |\n", i + 1, s.name, s.percentage));
        }

        md.push_str("\n| Class | Paid (M) | Pending (M) |\n");
        md.push_str("|-------|----------|-------------|\n");
        for c in &view.fees_by_class {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                c.class,
                format_fixed(c.paid_millions, 2),
                format_fixed(c.pending_millions, 2)
            ));
        }
    }

    md
}

pub fn format_summary_json(view: &DashboardView) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}

pub fn print_summary(view: &DashboardView) {
    println!("\n{}", "=== Dashboard Summary ===".bright_cyan().bold());

    println!("\n{}", "Overall Statistics:".yellow());
    for (label, value) in kpi_rows(view) {
        println!("  {}: {}", label, value.green());
    }

    println!("\n{}", "Results:".yellow());
    println!("  Pass: {}", view.pass_fail.pass.to_string().green());
    println!("  Fail: {}", view.pass_fail.fail.to_string().red());

    println!("\n{}", "Gender:".yellow());
    println!("  Male: {}", view.gender.male.to_string().cyan());
    println!("  Female: {}", view.gender.female.to_string().cyan());

    if let Some(best) = view.top_students.first() {
        println!("\n{}", "Top Student:".yellow());
        println!("  {} ({}%)", best.name.bright_blue(), best.percentage);
    }
}
