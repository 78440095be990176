use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Lead, PriorityTier};

const VISIT_MINUTES: u32 = 45;
const FIRST_SLOT_HOUR: u32 = 9;
const LAST_SLOT_HOUR: u32 = 23;

/// Ordered visit plan over a bounded subset of leads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub stops: Vec<RouteStop>,
    pub average_probability: f64,
    pub estimated_duration_minutes: u32,
}

/// Single stop on a route; `order` is 1-based in final visiting order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub order: u32,
    pub lead_id: String,
    pub location: String,
    pub address: String,
    pub category: &'static str,
    pub suggested_time: String,
    pub close_probability: u8,
    pub priority: PriorityTier,
}

/// Selects and orders up to `max_visits` leads into a visit route.
///
/// Sort key: priority tier ordinal ascending, then close probability
/// descending within a tier. No randomness; identical input lists produce
/// identical output apart from the clock-derived id and creation time.
pub fn plan_route(leads: &[Lead], max_visits: usize) -> Route {
    let mut ranked: Vec<&Lead> = leads.iter().collect();
    ranked.sort_by(|a, b| {
        a.priority
            .ordinal()
            .cmp(&b.priority.ordinal())
            .then(b.close_probability.cmp(&a.close_probability))
    });
    ranked.truncate(max_visits);

    let stops: Vec<RouteStop> = ranked
        .iter()
        .enumerate()
        .map(|(index, lead)| RouteStop {
            order: index as u32 + 1,
            lead_id: lead.id.clone(),
            location: format!("{} - {}", lead.zone, lead.municipality),
            address: lead.approximate_address.clone(),
            category: lead.category.label(),
            suggested_time: format!("{:02}:00", slot_hour(index as u32)),
            close_probability: lead.close_probability,
            priority: lead.priority,
        })
        .collect();

    let average_probability = if stops.is_empty() {
        0.0
    } else {
        let total: u32 = stops.iter().map(|stop| u32::from(stop.close_probability)).sum();
        let mean = f64::from(total) / stops.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    let created_at = Utc::now();
    build_route(created_at, stops, average_probability)
}

// Hourly slots from 09:00; routes longer than the working day wrap back to
// the first slot instead of producing hours past 23.
fn slot_hour(index: u32) -> u32 {
    FIRST_SLOT_HOUR + index % (LAST_SLOT_HOUR - FIRST_SLOT_HOUR + 1)
}

fn build_route(
    created_at: DateTime<Utc>,
    stops: Vec<RouteStop>,
    average_probability: f64,
) -> Route {
    Route {
        id: format!("route-{}", created_at.format("%Y%m%d%H%M%S")),
        created_at,
        estimated_duration_minutes: stops.len() as u32 * VISIT_MINUTES,
        average_probability,
        stops,
    }
}
