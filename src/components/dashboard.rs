//! Dashboard summary over the cached customer rows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use web_sys::{Document, Element};

use crate::constants::ID_DASHBOARD;
use crate::dom_utils::{by_id, clear_children};
use crate::error::AppError;
use crate::i18n::{text, Locale, Text};
use crate::models::{CustomerRow, Field};

/// Bucket for rows with an empty grouping cell.
const UNSET: &str = "-";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total: usize,
    pub visits_today: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_visit_status: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
    pub by_salesperson: BTreeMap<String, usize>,
}

/// Dates come from `<input type="date">` or are typed by hand in the sheet.
pub fn parse_visit_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

impl DashboardSummary {
    pub fn from_rows(rows: &[CustomerRow], today: NaiveDate) -> Self {
        fn bump(map: &mut BTreeMap<String, usize>, key: &str) {
            let key = if key.is_empty() { UNSET } else { key };
            *map.entry(key.to_string()).or_default() += 1;
        }

        let mut s = Self {
            total: rows.len(),
            ..Self::default()
        };
        for row in rows {
            bump(&mut s.by_status, row.get(Field::Status));
            bump(&mut s.by_visit_status, row.get(Field::VisitStatus));
            bump(&mut s.by_priority, row.get(Field::Priority));
            bump(&mut s.by_salesperson, row.get(Field::Salesperson));
            if parse_visit_date(row.get(Field::VisitDate)) == Some(today) {
                s.visits_today += 1;
            }
        }
        s
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn render(
    document: &Document,
    summary: &DashboardSummary,
    locale: Locale,
) -> Result<(), AppError> {
    let root = by_id(document, ID_DASHBOARD)?;
    clear_children(&root);

    let totals = document.create_element("div")?;
    totals.set_class_name("dashboard-totals");
    append_stat(document, &totals, text(locale, Text::TotalCustomers), summary.total)?;
    append_stat(document, &totals, text(locale, Text::VisitsToday), summary.visits_today)?;
    root.append_child(&totals)?;

    let groups = [
        (Text::ByStatus, &summary.by_status),
        (Text::ByVisitStatus, &summary.by_visit_status),
        (Text::ByPriority, &summary.by_priority),
        (Text::BySalesperson, &summary.by_salesperson),
    ];
    for (title, counts) in groups {
        let section = document.create_element("section")?;
        section.set_class_name("dashboard-group");
        let h = document.create_element("h3")?;
        h.set_text_content(Some(text(locale, title)));
        section.append_child(&h)?;
        for (label, count) in counts {
            append_stat(document, &section, label, *count)?;
        }
        root.append_child(&section)?;
    }
    Ok(())
}

fn append_stat(
    document: &Document,
    parent: &Element,
    label: &str,
    value: usize,
) -> Result<(), AppError> {
    let stat = document.create_element("div")?;
    stat.set_class_name("stat");
    let l = document.create_element("span")?;
    l.set_class_name("stat-label");
    l.set_text_content(Some(label));
    let v = document.create_element("span")?;
    v.set_class_name("stat-value");
    v.set_text_content(Some(&value.to_string()));
    stat.append_child(&l)?;
    stat.append_child(&v)?;
    parent.append_child(&stat)?;
    Ok(())
}
