use std::collections::HashSet;
use std::io::BufRead;

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::domain::types::{FleetConfig, Package};
use crate::error::InputError;
use crate::setup::input_types::{CostInput, DeliveryInput, Header};

/// Non-blank, trimmed lines paired with their 1-based line number.
pub fn read_lines<R: BufRead>(reader: R) -> std::io::Result<Vec<(usize, String)>> {
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push((index + 1, trimmed.to_string()));
        }
    }
    Ok(lines)
}

/// `base_cost package_count`
pub fn parse_first_line(line: &str, line_no: usize) -> Result<Header, InputError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let Some((base, count)) = fields.iter().collect_tuple() else {
        return Err(InputError::FieldCount {
            line: line_no,
            expected: "2",
            found: fields.len(),
        });
    };

    let base_cost = parse_number(base, line_no, "base cost")?;
    if base_cost < 0.0 {
        return Err(InputError::Negative {
            line: line_no,
            field: "base cost",
        });
    }
    let package_count = parse_integer(count, line_no, "number of packages")?;
    if package_count < 0 {
        return Err(InputError::Negative {
            line: line_no,
            field: "number of packages",
        });
    }

    Ok(Header {
        base_cost,
        package_count: package_count as usize,
    })
}

/// `id weight distance [offer_code]`
pub fn parse_package_line(line: &str, line_no: usize) -> Result<Package, InputError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(InputError::FieldCount {
            line: line_no,
            expected: "3 or 4",
            found: fields.len(),
        });
    }

    let weight = parse_number(fields[1], line_no, "weight")?;
    let distance = parse_number(fields[2], line_no, "distance")?;
    for (value, field) in [(weight, "weight"), (distance, "distance")] {
        if value < 0.0 {
            return Err(InputError::Negative { line: line_no, field });
        }
    }

    Ok(Package::new(fields[0], weight, distance, fields.get(3).copied()))
}

/// `num_vehicles max_speed capacity`
pub fn parse_vehicle_line(line: &str, line_no: usize) -> Result<FleetConfig, InputError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let Some((count, speed, capacity)) = fields.iter().collect_tuple() else {
        return Err(InputError::FieldCount {
            line: line_no,
            expected: "3",
            found: fields.len(),
        });
    };

    let num_vehicles = parse_integer(count, line_no, "number of vehicles")?;
    if num_vehicles <= 0 {
        return Err(InputError::NotPositive {
            line: line_no,
            field: "number of vehicles",
        });
    }
    let max_speed = parse_number(speed, line_no, "max speed")?;
    let capacity = parse_number(capacity, line_no, "capacity")?;

    FleetConfig::new(num_vehicles as usize, max_speed, capacity).map_err(|e| e.at_line(line_no))
}

pub fn parse_cost_input(lines: &[(usize, String)]) -> Result<CostInput, InputError> {
    let (header, packages) = parse_header_and_packages(lines, 1)?;
    warn_on_extra_lines(lines, packages.len() + 1);

    info!("Parsed {} packages for cost estimation", packages.len());
    Ok(CostInput {
        base_cost: header.base_cost,
        packages,
    })
}

pub fn parse_delivery_input(lines: &[(usize, String)]) -> Result<DeliveryInput, InputError> {
    let (header, packages) = parse_header_and_packages(lines, 2)?;

    let (line_no, vehicle_line) = &lines[packages.len() + 1];
    let fleet = parse_vehicle_line(vehicle_line, *line_no)?;
    warn_on_extra_lines(lines, packages.len() + 2);

    info!(
        "Parsed {} packages, {} vehicles at {} with capacity {}",
        packages.len(),
        fleet.num_vehicles(),
        fleet.max_speed(),
        fleet.capacity()
    );
    Ok(DeliveryInput {
        base_cost: header.base_cost,
        packages,
        fleet,
    })
}

/// `trailing` is how many non-package lines the batch needs besides the package lines.
fn parse_header_and_packages(
    lines: &[(usize, String)],
    trailing: usize,
) -> Result<(Header, Vec<Package>), InputError> {
    let Some((first_no, first)) = lines.first() else {
        return Err(InputError::MissingLines {
            expected: trailing,
            found: 0,
        });
    };
    let header = parse_first_line(first, *first_no)?;

    let expected = header.package_count + trailing;
    if lines.len() < expected {
        return Err(InputError::MissingLines {
            expected,
            found: lines.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut packages = Vec::with_capacity(header.package_count);
    for (line_no, line) in &lines[1..=header.package_count] {
        let package = parse_package_line(line, *line_no)?;
        if !seen.insert(package.id.clone()) {
            return Err(InputError::DuplicateId {
                line: *line_no,
                id: package.id,
            });
        }
        debug!("Parsed package: {:?}", package);
        packages.push(package);
    }

    Ok((header, packages))
}

fn warn_on_extra_lines(lines: &[(usize, String)], used: usize) {
    if lines.len() > used {
        warn!("Ignoring {} extra input lines", lines.len() - used);
    }
}

fn parse_number(token: &str, line: usize, field: &'static str) -> Result<f64, InputError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InputError::NotANumber {
            line,
            field,
            value: token.to_string(),
        })
}

fn parse_integer(token: &str, line: usize, field: &'static str) -> Result<i64, InputError> {
    token.parse::<i64>().map_err(|_| InputError::NotANumber {
        line,
        field,
        value: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(lines: &[&str]) -> Vec<(usize, String)> {
        lines
            .iter()
            .enumerate()
            .map(|(i, l)| (i + 1, l.to_string()))
            .collect()
    }

    #[test]
    fn parses_first_line() {
        let header = parse_first_line("100 3", 1).unwrap();
        assert_eq!(header.base_cost, 100.0);
        assert_eq!(header.package_count, 3);
    }

    #[test]
    fn first_line_errors() {
        assert!(matches!(
            parse_first_line("100", 1),
            Err(InputError::FieldCount { found: 1, .. })
        ));
        assert!(matches!(
            parse_first_line("abc 3", 1),
            Err(InputError::NotANumber { field: "base cost", .. })
        ));
        assert!(matches!(
            parse_first_line("100 2.5", 1),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_first_line("-5 3", 1),
            Err(InputError::Negative { .. })
        ));
        assert!(matches!(
            parse_first_line("100 -3", 1),
            Err(InputError::Negative { .. })
        ));
    }

    #[test]
    fn parses_package_line() {
        let package = parse_package_line("PKG1 50 30 OFR001", 2).unwrap();
        assert_eq!(package, Package::new("PKG1", 50.0, 30.0, Some("OFR001")));

        let without_offer = parse_package_line("PKG2  12.5   7", 3).unwrap();
        assert_eq!(without_offer, Package::new("PKG2", 12.5, 7.0, None));
    }

    #[test]
    fn package_line_errors() {
        assert!(matches!(
            parse_package_line("PKG1 50", 2),
            Err(InputError::FieldCount { line: 2, .. })
        ));
        assert!(matches!(
            parse_package_line("PKG1 50 30 OFR001 extra", 2),
            Err(InputError::FieldCount { found: 5, .. })
        ));
        assert!(matches!(
            parse_package_line("PKG1 heavy 30 OFR001", 2),
            Err(InputError::NotANumber { field: "weight", .. })
        ));
        assert!(matches!(
            parse_package_line("PKG1 50 -30 OFR001", 4),
            Err(InputError::Negative { line: 4, field: "distance" })
        ));
        assert!(matches!(
            parse_package_line("PKG1 NaN 30 OFR001", 2),
            Err(InputError::NotANumber { .. })
        ));
    }

    #[test]
    fn parses_vehicle_line() {
        let fleet = parse_vehicle_line("2 70 200", 7).unwrap();
        assert_eq!(fleet.num_vehicles(), 2);
        assert_eq!(fleet.max_speed(), 70.0);
        assert_eq!(fleet.capacity(), 200.0);
    }

    #[test]
    fn vehicle_line_errors() {
        assert!(matches!(
            parse_vehicle_line("2 70", 7),
            Err(InputError::FieldCount { expected: "3", .. })
        ));
        assert!(matches!(
            parse_vehicle_line("1.5 70 200", 7),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_vehicle_line("0 70 200", 7),
            Err(InputError::NotPositive { field: "number of vehicles", .. })
        ));
        assert!(matches!(
            parse_vehicle_line("2 0 200", 7),
            Err(InputError::NotPositive { line: 7, field: "max speed" })
        ));
        assert!(matches!(
            parse_vehicle_line("2 70 -1", 7),
            Err(InputError::NotPositive { line: 7, field: "capacity" })
        ));
    }

    #[test]
    fn parses_delivery_batch() {
        let lines = numbered(&[
            "100 2",
            "PKG1 50 30 OFR001",
            "PKG2 75 125 OFFR0008",
            "2 70 200",
        ]);
        let input = parse_delivery_input(&lines).unwrap();
        assert_eq!(input.base_cost, 100.0);
        assert_eq!(input.packages.len(), 2);
        assert_eq!(input.packages[1].offer_code.as_deref(), Some("OFFR0008"));
        assert_eq!(input.fleet.num_vehicles(), 2);
    }

    #[test]
    fn delivery_batch_needs_vehicle_line() {
        let lines = numbered(&["100 2", "PKG1 50 30 OFR001", "PKG2 75 125 NA"]);
        assert!(matches!(
            parse_delivery_input(&lines),
            Err(InputError::MissingLines { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn cost_batch_ignores_trailing_lines() {
        let lines = numbered(&["100 1", "PKG1 5 5 OFR001", "2 70 200"]);
        let input = parse_cost_input(&lines).unwrap();
        assert_eq!(input.packages.len(), 1);
    }

    #[test]
    fn empty_batches() {
        assert!(matches!(
            parse_cost_input(&[]),
            Err(InputError::MissingLines { found: 0, .. })
        ));

        let input = parse_delivery_input(&numbered(&["100 0", "1 50 100"])).unwrap();
        assert!(input.packages.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let lines = numbered(&["100 2", "PKG1 5 5 OFR001", "PKG1 10 5 OFR001"]);
        assert!(matches!(
            parse_cost_input(&lines),
            Err(InputError::DuplicateId { line: 3, .. })
        ));
    }

    #[test]
    fn read_lines_skips_blanks_and_keeps_numbers() {
        let text = "100 1\n\n  PKG1 5 5 OFR001  \n";
        let lines = read_lines(text.as_bytes()).unwrap();
        assert_eq!(
            lines,
            vec![(1, "100 1".to_string()), (3, "PKG1 5 5 OFR001".to_string())]
        );
    }
}
