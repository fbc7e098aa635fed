use std::io;
use std::path::Path;

use colored::*;
use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::domain::types::{CostEstimate, DispatchRecord};

const COST_WIDTH: usize = 40;
const DELIVERY_WIDTH: usize = 75;

pub fn render_cost_table(estimates: &[CostEstimate]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "== Delivery Cost Estimation ==".bold()));
    out.push_str(&format!("{}\n", "═".repeat(COST_WIDTH)));
    let header = format!("{:<14} {:<13} {}", "PKG_ID", "DISCOUNT", "TOTAL_COST");
    out.push_str(&format!("{}\n", header.bold()));
    out.push_str(&format!("{}\n", "─".repeat(COST_WIDTH)));
    for estimate in estimates {
        out.push_str(&format!(
            "{:<14} {} {}\n",
            estimate.id,
            discount_cell(estimate.discount, 13),
            estimate.total_cost
        ));
    }
    out.push_str(&format!("{}\n", "═".repeat(COST_WIDTH)));
    out
}

pub fn render_delivery_table(records: &[DispatchRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "== Delivery Time Estimation ==".bold()));
    out.push_str(&format!("{}\n", "═".repeat(DELIVERY_WIDTH)));
    let header = format!(
        "{:<14} {:<14} {:<14} {}",
        "PKG_ID", "DISCOUNT", "TOTAL_COST", "DELIVERY_TIME (hrs)"
    );
    out.push_str(&format!("{}\n", header.bold()));
    out.push_str(&format!("{}\n", "─".repeat(DELIVERY_WIDTH)));
    for record in records {
        out.push_str(&format!(
            "{:<14} {} {:<14} {:.2}\n",
            record.id(),
            discount_cell(record.discount(), 14),
            record.total_cost(),
            record.eta
        ));
    }
    out.push_str(&format!("{}\n", "═".repeat(DELIVERY_WIDTH)));
    out
}

// Pad before colouring so escape codes don't eat into the column width.
fn discount_cell(discount: u64, width: usize) -> ColoredString {
    let cell = format!("{:<width$}", discount);
    if discount > 0 {
        cell.green()
    } else {
        cell.normal()
    }
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn write_csv<W: io::Write>(
    records: &[DispatchRecord],
    wtr: &mut Writer<W>,
) -> Result<(), csv::Error> {
    wtr.write_record([
        "id",
        "weight",
        "distance",
        "offer_code",
        "delivery_cost",
        "discount",
        "total_cost",
        "vehicle",
        "departed_at",
        "eta",
    ])?;

    for record in records {
        let package = &record.priced.package;
        let quote = &record.priced.quote;
        wtr.write_record([
            package.id.clone(),
            package.weight.to_string(),
            package.distance.to_string(),
            package.offer_code.clone().unwrap_or_default(),
            quote.delivery_cost.to_string(),
            quote.discount.to_string(),
            quote.total_cost.to_string(),
            record.vehicle.to_string(),
            format!("{:.2}", record.departed_at),
            format!("{:.2}", record.eta),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn save_to_csv(records: &[DispatchRecord], path: &Path) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_path(path)?;
    write_csv(records, &mut wtr)?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Package, PricedPackage, Quote};

    fn record(id: &str, discount: u64, total_cost: u64, eta: f64) -> DispatchRecord {
        DispatchRecord {
            priced: PricedPackage {
                package: Package::new(id, 50.0, 30.0, Some("OFR001")),
                quote: Quote {
                    delivery_cost: total_cost + discount,
                    discount,
                    total_cost,
                },
            },
            eta,
            vehicle: 1,
            departed_at: 3.571_428,
        }
    }

    #[test]
    fn delivery_table_prints_two_decimal_etas() {
        colored::control::set_override(false);
        let records = [record("PKG1", 0, 750, 4.0), record("PKG4", 105, 1395, 0.86)];
        let table = render_delivery_table(&records);
        let rows: Vec<&str> = table.lines().filter(|l| l.starts_with("PKG")).collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("PKG1"));
        assert!(rows[1].ends_with("4.00"));
        assert!(rows[2].contains("105"));
        assert!(rows[2].ends_with("0.86"));
    }

    #[test]
    fn cost_table_lists_every_estimate() {
        colored::control::set_override(false);
        let estimates = vec![
            CostEstimate { id: "PKG1".into(), discount: 0, total_cost: 175 },
            CostEstimate { id: "PKG3".into(), discount: 35, total_cost: 665 },
        ];
        let table = render_cost_table(&estimates);
        assert!(table.contains("PKG_ID"));
        assert!(table.lines().any(|l| l.starts_with("PKG3") && l.trim_end().ends_with("665")));
    }

    #[test]
    fn json_flattens_price_fields() {
        let json = render_json(&[record("PKG1", 0, 750, 4.0)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "PKG1");
        assert_eq!(value[0]["total_cost"], 750);
        assert_eq!(value[0]["eta"], 4.0);
        assert_eq!(value[0]["vehicle"], 1);
    }

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let mut wtr = Writer::from_writer(vec![]);
        write_csv(&[record("PKG1", 0, 750, 4.0), record("PKG2", 0, 1475, 1.79)], &mut wtr).unwrap();
        let bytes = match wtr.into_inner() {
            Ok(bytes) => bytes,
            Err(_) => panic!("csv writer did not flush"),
        };
        let data = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = data.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,weight,distance"));
        assert_eq!(lines[1], "PKG1,50,30,OFR001,750,0,750,1,3.57,4.00");
        assert!(lines[2].ends_with("1.79"));
    }
}
