use chrono::{DateTime, Utc};

use crate::campaign::CampaignBody;

use super::Filter;

const HEADERS: [&str; 5] = ["Name", "Budget", "Start Date", "End Date", "Status"];
pub const EMPTY_PLACEHOLDER: &str = "No campaigns found.";

pub fn format_budget(budget: f64) -> String {
    format!("${:.2}", budget)
}

// `%x` is chrono's preferred short date representation
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.date_naive().format("%x").to_string()
}

fn row(campaign: &CampaignBody) -> [String; 5] {
    [
        campaign.name.clone(),
        format_budget(campaign.budget),
        format_date(&campaign.start_date),
        format_date(&campaign.end_date),
        campaign.status.clone(),
    ]
}

/// Renders the campaigns as a plain text table. An empty list still gets
/// the header and a single placeholder row.
pub fn render_table(campaigns: &[&CampaignBody]) -> String {
    let rows: Vec<[String; 5]> = campaigns.iter().map(|campaign| row(campaign)).collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS.iter().map(|header| header.to_string()).collect();
    write_row(&mut out, &widths, &header);

    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&separator.join("-+-"));
    out.push('\n');

    if rows.is_empty() {
        out.push_str(EMPTY_PLACEHOLDER);
        out.push('\n');
    }

    for row in &rows {
        write_row(&mut out, &widths, row);
    }

    out
}

fn write_row(out: &mut String, widths: &[usize; 5], cells: &[String]) {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();

    out.push_str(cells.join(" | ").trim_end());
    out.push('\n');
}

pub fn render_dashboard(filter: Filter, campaigns: &[&CampaignBody], error: &str) -> String {
    let mut out = String::new();
    out.push_str("Campaign Dashboard\n");
    out.push_str(&format!("Filter: {}\n", filter));
    out.push('\n');
    out.push_str(&render_table(campaigns));

    if !error.is_empty() {
        out.push('\n');
        out.push_str(&format!("Error: {}\n", error));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::CampaignId;
    use chrono::TimeZone;

    fn spring_sale() -> CampaignBody {
        CampaignBody {
            id: CampaignId::from_raw(1),
            name: "Spring Sale".into(),
            budget: 1500.0,
            start_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap(),
            status: "active".into(),
        }
    }

    #[test]
    fn budget_has_currency_and_two_decimals() {
        assert_eq!(format_budget(1500.0), "$1500.00");
        assert_eq!(format_budget(1234.5), "$1234.50");
        assert_eq!(format_budget(0.5), "$0.50");
    }

    #[test]
    fn empty_table_has_placeholder_row() {
        let table = render_table(&[]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name"));
        assert_eq!(lines[2], EMPTY_PLACEHOLDER);
    }

    #[test]
    fn rows_are_rendered_under_headers() {
        let campaign = spring_sale();
        let table = render_table(&[&campaign]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(!table.contains(EMPTY_PLACEHOLDER));
        assert!(lines[2].starts_with("Spring Sale | $1500.00"));
        assert!(lines[2].contains(&format_date(&campaign.start_date)));
        assert!(lines[2].ends_with("active"));
    }

    #[test]
    fn dashboard_shows_filter_and_error() {
        let out = render_dashboard(Filter::All, &[], "All fields are required.");

        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Campaign Dashboard");
        assert_eq!(lines[1], "Filter: all");
        assert_eq!(lines.last(), Some(&"Error: All fields are required."));
    }
}
