use tracing::{debug, info, span, Level};

use crate::domain::types::{DispatchRecord, FleetConfig, Load, Package, PricedPackage};
use crate::error::ScheduleError;
use crate::pricing::PricingRule;
use crate::solver::fleet::{calculate_eta, calculate_return_time, FleetClock};
use crate::solver::selection::{SelectionPolicy, ShipmentSelector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleSummary {
    pub trips: usize,
    /// Time the last vehicle is back at base.
    pub makespan: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// One record per input package, in input order.
    pub records: Vec<DispatchRecord>,
    pub summary: ScheduleSummary,
}

/// Prices packages, then repeatedly loads the best shipment onto the vehicle that frees up first.
pub struct DispatchScheduler {
    pricing: PricingRule,
    selector: Box<dyn ShipmentSelector>,
}

impl DispatchScheduler {
    pub fn new(pricing: PricingRule, selector: Box<dyn ShipmentSelector>) -> Self {
        Self { pricing, selector }
    }

    pub fn with_policy(pricing: PricingRule, policy: SelectionPolicy) -> Self {
        Self::new(pricing, policy.selector())
    }

    /// All-or-nothing: either every package gets a record or the run fails.
    pub fn schedule(
        &self,
        packages: &[Package],
        base_cost: f64,
        fleet: &FleetConfig,
    ) -> Result<Schedule, ScheduleError> {
        let schedule_span = span!(
            Level::INFO,
            "schedule",
            packages = packages.len(),
            vehicles = fleet.num_vehicles()
        );
        let _schedule_guard = schedule_span.enter();

        let mut remaining: Vec<(usize, PricedPackage)> = packages
            .iter()
            .map(|package| self.pricing.price(package, base_cost))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .enumerate()
            .collect();

        let mut clock = FleetClock::new(fleet);
        let mut dispatched: Vec<(usize, DispatchRecord)> = Vec::with_capacity(packages.len());
        let mut trips = 0;

        while !remaining.is_empty() {
            let loads: Vec<Load> = remaining.iter().map(|(_, p)| p.package.load()).collect();
            let shipment = self.selector.select(&loads, clock.capacity());

            if shipment.is_empty() {
                return Err(ScheduleError::Unschedulable {
                    remaining: remaining
                        .into_iter()
                        .map(|(_, p)| p.package.id)
                        .collect(),
                });
            }

            trips += 1;
            let trip_span = span!(Level::DEBUG, "shipment", trip = trips, size = shipment.len());
            let _trip_guard = trip_span.enter();

            let (vehicle, current_time) = clock.next_free_vehicle();
            let max_distance = shipment.max_distance(&loads);
            let return_time = calculate_return_time(current_time, max_distance, clock.max_speed());
            clock.advance(vehicle, return_time);

            let mut chosen = vec![false; remaining.len()];
            for &member in &shipment.members {
                chosen[member] = true;
            }
            let (shipped, rest): (Vec<_>, Vec<_>) = remaining
                .into_iter()
                .enumerate()
                .partition(|(position, _)| chosen[*position]);
            remaining = rest.into_iter().map(|(_, entry)| entry).collect();

            for (_, (original_index, priced)) in shipped {
                let eta = calculate_eta(current_time, priced.package.distance, clock.max_speed());
                debug!(
                    "{} on vehicle {} departing {:.2}, eta {:.2}",
                    priced.package.id, vehicle, current_time, eta
                );
                dispatched.push((
                    original_index,
                    DispatchRecord {
                        priced,
                        eta,
                        vehicle,
                        departed_at: current_time,
                    },
                ));
            }
        }

        dispatched.sort_by_key(|(original_index, _)| *original_index);
        let summary = ScheduleSummary {
            trips,
            makespan: clock.makespan(),
        };
        info!(
            "Scheduled {} packages in {} trips, fleet back at {:.2}",
            dispatched.len(),
            summary.trips,
            summary.makespan
        );

        Ok(Schedule {
            records: dispatched.into_iter().map(|(_, record)| record).collect(),
            summary,
        })
    }
}

/// Schedules with the standard offers and exhaustive selection.
pub fn schedule_deliveries(
    packages: &[Package],
    base_charge: f64,
    fleet: &FleetConfig,
) -> Result<Vec<DispatchRecord>, ScheduleError> {
    DispatchScheduler::with_policy(PricingRule::default(), SelectionPolicy::Exhaustive)
        .schedule(packages, base_charge, fleet)
        .map(|schedule| schedule.records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet(vehicles: usize, speed: f64, capacity: f64) -> FleetConfig {
        FleetConfig::new(vehicles, speed, capacity).unwrap()
    }

    fn scheduler(policy: SelectionPolicy) -> DispatchScheduler {
        DispatchScheduler::with_policy(PricingRule::default(), policy)
    }

    #[test]
    fn single_package_trip() {
        let packages = vec![Package::new("P1", 50.0, 30.0, None)];
        let schedule = scheduler(SelectionPolicy::Exhaustive)
            .schedule(&packages, 100.0, &fleet(1, 50.0, 100.0))
            .unwrap();

        assert_eq!(schedule.records.len(), 1);
        let record = &schedule.records[0];
        assert_eq!(record.id(), "P1");
        assert_eq!(record.eta, 0.6);
        assert_eq!(record.vehicle, 0);
        assert_eq!(record.departed_at, 0.0);
        assert_eq!(schedule.summary.trips, 1);
        assert_eq!(schedule.summary.makespan, 1.2);
    }

    #[test]
    fn empty_input_schedules_nothing() {
        let schedule = scheduler(SelectionPolicy::Greedy)
            .schedule(&[], 100.0, &fleet(1, 100.0, 200.0))
            .unwrap();
        assert!(schedule.records.is_empty());
        assert_eq!(schedule.summary.trips, 0);
        assert_eq!(schedule.summary.makespan, 0.0);
    }

    #[test]
    fn pair_filling_capacity_travels_together() {
        let packages = vec![
            Package::new("A", 100.0, 100.0, Some("OFR001")),
            Package::new("B", 100.0, 150.0, None),
        ];
        let schedule = scheduler(SelectionPolicy::Exhaustive)
            .schedule(&packages, 100.0, &fleet(1, 50.0, 200.0))
            .unwrap();

        assert_eq!(schedule.summary.trips, 1);
        let a = &schedule.records[0];
        let b = &schedule.records[1];
        assert_eq!((a.discount(), a.total_cost(), a.eta), (160, 1440, 2.0));
        assert_eq!((b.discount(), b.total_cost(), b.eta), (0, 1850, 3.0));
    }

    #[test]
    fn second_trip_waits_for_returning_vehicle() {
        let packages = vec![
            Package::new("P1", 80.0, 50.0, None),
            Package::new("P2", 80.0, 100.0, None),
        ];
        let schedule = scheduler(SelectionPolicy::Exhaustive)
            .schedule(&packages, 0.0, &fleet(1, 50.0, 100.0))
            .unwrap();

        // same weight, so the shorter trip goes first and is back at 2.0
        assert_eq!(schedule.records[0].departed_at, 0.0);
        assert_eq!(schedule.records[0].eta, 1.0);
        assert_eq!(schedule.records[1].departed_at, 2.0);
        assert_eq!(schedule.records[1].eta, 4.0);
        assert_eq!(schedule.summary.makespan, 6.0);
    }

    #[test]
    fn unschedulable_packages_fail_the_run() {
        let packages = vec![
            Package::new("OK", 50.0, 10.0, None),
            Package::new("HEAVY1", 150.0, 10.0, None),
            Package::new("HEAVY2", 150.0, 20.0, None),
        ];
        let err = scheduler(SelectionPolicy::Exhaustive)
            .schedule(&packages, 100.0, &fleet(2, 50.0, 100.0))
            .unwrap_err();

        match err {
            ScheduleError::Unschedulable { remaining } => {
                assert_eq!(remaining, vec!["HEAVY1".to_string(), "HEAVY2".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn pricing_failure_aborts_before_dispatch() {
        let packages = vec![Package::new("P1", 50.0, 30.0, None)];
        let err = schedule_deliveries(&packages, -1.0, &fleet(1, 50.0, 100.0)).unwrap_err();
        assert!(matches!(err, ScheduleError::Pricing(_)));
    }
}
