//! Text rendering for the command-line front end.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::status::{inventory_value, status_of, stock_value, StatusCounts};
use crate::record::Record;

/// Formats an amount in euros, French style: `1 234,50 €`.
pub fn format_price(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let units = (cents / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped},{:02} €", cents % 100)
}

/// `dd/mm/yyyy`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn render_stats(counts: &StatusCounts, items: &[Record]) -> String {
    format!(
        "Total : {}  En stock : {}  Stock faible : {}  Rupture : {}  Valeur : {}",
        counts.total,
        counts.normal,
        counts.low,
        counts.rupture,
        format_price(inventory_value(items)),
    )
}

const HEADERS: [&str; 8] = [
    "ID", "NOM", "FOURNISSEUR", "SKU", "CATÉGORIE", "STATUT", "PRIX", "VALEUR",
];

/// One row per record, columns padded to their widest cell.
pub fn render_table(items: &[Record]) -> String {
    if items.is_empty() {
        return "Aucun article.\n".to_string();
    }

    let rows: Vec<[String; 8]> = items
        .iter()
        .map(|r| {
            [
                r.id.clone(),
                r.name.clone(),
                r.supplier.clone().unwrap_or_else(|| "-".to_string()),
                r.sku.clone(),
                r.category.to_string(),
                format!("{} ({})", status_of(r).label(), r.quantity),
                format_price(r.price),
                format_price(stock_value(r)),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Full view of one record.
pub fn render_detail(record: &Record) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: String| {
        let _ = writeln!(out, "  {:<16}{value}", format!("{label} :"));
    };
    line("SKU", record.sku.clone());
    line("Catégorie", record.category.to_string());
    line(
        "Statut",
        format!(
            "{} ({} / seuil {})",
            status_of(record).label(),
            record.quantity,
            record.min_quantity
        ),
    );
    line("Prix unitaire", format_price(record.price));
    line("Valeur", format_price(stock_value(record)));
    if let Some(supplier) = &record.supplier {
        line("Fournisseur", supplier.clone());
    }
    line("Créé le", format_date(&record.created_at));
    line("Modifié le", format_date(&record.updated_at));

    let mut detail = format!("{} ({})\n", record.name, record.id);
    detail.push_str(&out);
    if let Some(description) = &record.description {
        let _ = writeln!(detail, "  {description}");
    }
    detail
}
