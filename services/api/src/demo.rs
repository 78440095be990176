use crate::infra::InMemoryProspectRepository;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

use prospect_engine::acquisition::ListingAcquirer;
use prospect_engine::error::AppError;
use prospect_engine::leads::{plan_route, seasonality_report, Lead, LeadGenerator, Route};
use prospect_engine::market::{CrimeTable, RegionStats, RegionStatsService, StaticPopulation, ZoneCatalog};
use prospect_engine::prospects::{ProspectService, ScrapeParams};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Municipality used for the lead and route portion of the demo.
    #[arg(long, default_value = "Santos")]
    pub(crate) municipality: String,
    /// Maximum number of stops on the demo route.
    #[arg(long, default_value_t = 5)]
    pub(crate) max_visits: usize,
    /// Override the reporting date (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Listing cap for the scrape-and-create portion of the demo.
    #[arg(long, default_value_t = 6)]
    pub(crate) max_results: usize,
    /// Skip the prospect ingestion portion of the demo.
    #[arg(long)]
    pub(crate) skip_scrape: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LeadsReportArgs {
    /// Municipality to expand into scored leads.
    #[arg(long)]
    pub(crate) municipality: String,
    /// Also plan a visit route over the generated leads.
    #[arg(long)]
    pub(crate) plan: bool,
    /// Maximum number of stops when planning a route.
    #[arg(long, default_value_t = 5)]
    pub(crate) max_visits: usize,
}

pub(crate) fn run_leads_report(args: LeadsReportArgs) -> Result<(), AppError> {
    let LeadsReportArgs {
        municipality,
        plan,
        max_visits,
    } = args;

    let generator = LeadGenerator::new(Arc::new(ZoneCatalog::reference()));
    let leads = generator.leads_for_municipality(&municipality);
    render_leads(&municipality, &leads);

    if plan {
        let route = plan_route(&leads, max_visits);
        render_route(&route);
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        municipality,
        max_visits,
        today,
        max_results,
        skip_scrape,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Prospecting intelligence demo (offline reference data)");

    let statistics = RegionStatsService::new(
        Arc::new(StaticPopulation::reference()),
        Arc::new(CrimeTable::reference()),
    );
    let stats = statistics.region_statistics("baixada_santista").await;
    render_region_stats(&stats);

    let generator = LeadGenerator::new(Arc::new(ZoneCatalog::reference()));
    let leads = generator.leads_for_municipality(&municipality);
    render_leads(&municipality, &leads);

    let route = plan_route(&leads, max_visits);
    render_route(&route);

    let seasonality = seasonality_report(today);
    println!("\nSeasonality outlook ({today})");
    println!(
        "- {}: {:.2}x demand ({})",
        seasonality.current_month.label,
        seasonality.current_month.demand_factor,
        seasonality.current_month.driver
    );
    println!("- Peak months: {}", seasonality.peak_months.join(", "));
    println!("- {}", seasonality.recommendation);

    if skip_scrape {
        return Ok(());
    }

    println!("\nProspect ingestion demo (sourceless acquirer, synthetic listings)");
    let repository = Arc::new(InMemoryProspectRepository::default());
    let acquirer = Arc::new(ListingAcquirer::new(Vec::new(), Duration::from_millis(100)));
    let service = ProspectService::new(repository, acquirer);

    let params = ScrapeParams {
        city: municipality.clone(),
        neighborhood: None,
        kind: None,
        sector: None,
        access_control: None,
        max_results: Some(max_results),
    };

    let summary = match service.scrape_and_create(params).await {
        Ok(summary) => summary,
        Err(err) => {
            println!("  Ingestion unavailable: {err}");
            return Ok(());
        }
    };

    println!(
        "- {} listings acquired ({}), {} prospects created",
        summary.scraped,
        if summary.simulated { "synthetic" } else { "scraped" },
        summary.created
    );
    for prospect in &summary.prospects {
        println!(
            "  - {} | {} | priority {} | {}",
            prospect.name,
            prospect.access_control.display_label(),
            prospect.priority.label(),
            prospect
                .address
                .as_deref()
                .unwrap_or("address unknown")
        );
    }

    match service.statistics() {
        Ok(rollup) => {
            println!("- Pipeline total: {} prospects", rollup.total);
            for (stage, count) in &rollup.by_interest_stage {
                if *count > 0 {
                    println!("  - stage {stage}: {count}");
                }
            }
        }
        Err(err) => println!("  Statistics unavailable: {err}"),
    }

    Ok(())
}

fn render_region_stats(stats: &RegionStats) {
    println!("\nRegion statistics: {}", stats.region);
    for municipality in &stats.municipalities {
        println!(
            "- {} | pop {} | crime {:.1} | ~{} condominiums | ~{} businesses | opportunity {:.2}",
            municipality.name,
            municipality.population,
            municipality.crime.index,
            municipality.estimated_condominiums,
            municipality.estimated_businesses,
            municipality.opportunity_index
        );
    }
}

fn render_leads(municipality: &str, leads: &[Lead]) {
    if leads.is_empty() {
        println!("\nNo zone coverage for {municipality}; no leads generated");
        return;
    }

    println!("\nLeads for {municipality}");
    for lead in leads {
        println!(
            "- {} ({}) | close {}% | priority {} | visit {}",
            lead.zone,
            lead.category.label(),
            lead.close_probability,
            lead.priority.label(),
            lead.best_visit_window
        );
    }
}

fn render_route(route: &Route) {
    if route.stops.is_empty() {
        println!("\nRoute: no stops to plan");
        return;
    }

    println!(
        "\nRoute {} | {} stops | avg close {:.1}% | ~{} min",
        route.id,
        route.stops.len(),
        route.average_probability,
        route.estimated_duration_minutes
    );
    for stop in &route.stops {
        println!(
            "  {}. {} at {} | {} | close {}%",
            stop.order, stop.location, stop.suggested_time, stop.address, stop.close_probability
        );
    }
}
