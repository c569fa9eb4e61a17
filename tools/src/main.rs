//! dashboard-runner: headless renderer for the retention dashboard.
//!
//! Usage:
//!   dashboard-runner --seed 12345 --users 500
//!   dashboard-runner --view users --search techflow --json
//!   dashboard-runner --view user --user user-17
//!   dashboard-runner --view campaign --campaign campaign-2
//!   dashboard-runner --view compose --segment "High Risk" --channel Email
//!   dashboard-runner --config dashboard.json --out snapshot.json

use anyhow::Result;
use retention_core::{
    campaign::find_campaign,
    config::DashboardConfig,
    model::{format_money, AiRecommendation, Campaign, HealthBand, Plan, Segment, User},
    navigation::{NavEvent, Navigator, UserDetail},
    performance::{
        campaign_rows, campaign_totals, clv_trend, retention_trend, series_peak, CampaignRow,
        CampaignTotals, TimeRange, TrendPoint,
    },
    query::{at_risk_users, search_segments, upgrade_opportunities, UserQuery},
    selector::{compose_message_for, recommend_for, simulate_generation},
    snapshot::DashboardSnapshot,
};
use serde::Serialize;
use std::env;

const BAR_WIDTH: f64 = 24.0;

#[derive(Serialize)]
struct RunSummary<'a> {
    seed: u64,
    generated_at: String,
    users: usize,
    mrr: i64,
    active_users: usize,
    avg_clv: String,
    churn_rate: String,
    segments: Vec<SegmentCard<'a>>,
}

#[derive(Serialize)]
struct SegmentCard<'a> {
    id: &'a str,
    name: &'a str,
    users: usize,
    avg_clv: String,
}

impl<'a> From<&'a Segment> for SegmentCard<'a> {
    fn from(s: &'a Segment) -> Self {
        Self {
            id: &s.id,
            name: &s.name,
            users: s.user_count,
            avg_clv: s.avg_clv_display(),
        }
    }
}

#[derive(Serialize)]
struct UserRow<'a> {
    id: &'a str,
    name: &'a str,
    company: &'a str,
    plan: Plan,
    clv: i64,
    churn_probability: f64,
    health_score: u32,
    health_band: HealthBand,
}

impl<'a> From<&'a User> for UserRow<'a> {
    fn from(u: &'a User) -> Self {
        Self {
            id: &u.id,
            name: &u.name,
            company: &u.company,
            plan: u.plan,
            clv: u.clv,
            churn_probability: u.churn_probability,
            health_score: u.health_score(),
            health_band: u.health_band(),
        }
    }
}

#[derive(Serialize)]
struct UserReport<'a> {
    user: &'a User,
    health_score: u32,
    health_band: HealthBand,
    recommendation: AiRecommendation,
}

#[derive(Serialize)]
struct PerformanceReport {
    range: TimeRange,
    retention: Vec<TrendPoint>,
    clv: Vec<TrendPoint>,
    campaigns: Vec<CampaignRow>,
    totals: CampaignTotals,
}

#[derive(Serialize)]
struct CampaignReport<'a> {
    campaign: &'a Campaign,
    segment: Option<&'a Segment>,
}

#[derive(Serialize)]
struct ComposeReport<'a> {
    status: &'a str,
    message: &'a str,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match string_arg(&args, "--config") {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(seed) = parse_arg::<u64>(&args, "--seed") {
        config = config.with_seed(seed);
    }
    if let Some(users) = parse_arg::<usize>(&args, "--users") {
        config = config.with_population_size(users);
    }
    let json = args.iter().any(|a| a == "--json");
    let view = string_arg(&args, "--view").unwrap_or("summary");

    let snapshot = DashboardSnapshot::build(&config)?;

    if let Some(path) = string_arg(&args, "--out") {
        snapshot.write_json(path)?;
        log::info!("Snapshot written to {path}");
    }

    match view {
        "summary" if json => println!("{}", snapshot.to_json()?),
        "summary" => print_summary(&snapshot),
        "users" => print_users(&snapshot, string_arg(&args, "--search").unwrap_or(""), json)?,
        "user" => print_user(&snapshot, string_arg(&args, "--user").unwrap_or_default(), json)?,
        "segments" => {
            print_segments(&snapshot, string_arg(&args, "--search").unwrap_or(""), json)?
        }
        "performance" => print_performance(&snapshot, string_arg(&args, "--range"), json)?,
        "campaign" => {
            print_campaign(&snapshot, string_arg(&args, "--campaign").unwrap_or_default(), json)?
        }
        "compose" => {
            let segment = string_arg(&args, "--segment").unwrap_or("High Risk");
            let channel = string_arg(&args, "--channel").unwrap_or("Email");
            let status = simulate_generation().await;
            let message = compose_message_for(segment, channel);
            if json {
                print_json(&ComposeReport { status, message })?;
            } else {
                println!("{status}");
                println!("{message}");
            }
        }
        other => {
            log::warn!("Unknown view: {other}, showing summary");
            print_summary(&snapshot);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summary(snapshot: &DashboardSnapshot) {
    let summary = RunSummary {
        seed: snapshot.seed,
        generated_at: snapshot.generated_at.to_rfc3339(),
        users: snapshot.users.len(),
        mrr: snapshot.metrics.mrr,
        active_users: snapshot.metrics.active_users,
        avg_clv: format_money(snapshot.metrics.avg_clv),
        churn_rate: snapshot.metrics.churn_rate_display(),
        segments: snapshot.segments.iter().map(SegmentCard::from).collect(),
    };

    println!("=== RETENTION DASHBOARD ===");
    println!("  seed:          {}", summary.seed);
    println!("  generated at:  {}", summary.generated_at);
    println!("  users:         {}", summary.users);
    println!("  MRR:           {}", format_money(Some(summary.mrr)));
    println!("  active users:  {}", summary.active_users);
    println!("  avg CLV:       {}", summary.avg_clv);
    println!("  churn rate:    {}", summary.churn_rate);

    println!();
    println!("=== SEGMENTS ===");
    for card in &summary.segments {
        println!(
            "  {:<12} {:>5} users | {} avg CLV",
            card.name, card.users, card.avg_clv
        );
    }

    println!();
    println!("=== AT RISK ===");
    print_user_lines(&at_risk_users(&snapshot.users));

    println!();
    println!("=== UPGRADE OPPORTUNITIES ===");
    print_user_lines(&upgrade_opportunities(&snapshot.users));

    log::debug!(
        "summary: {}",
        serde_json::to_string(&summary).unwrap_or_default()
    );
}

fn print_users(snapshot: &DashboardSnapshot, search: &str, json: bool) -> Result<()> {
    let rows = UserQuery::default().with_search(search).apply(&snapshot.users);
    if json {
        let rows: Vec<UserRow> = rows.into_iter().map(UserRow::from).collect();
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("  (No users match {search:?})");
        return Ok(());
    }
    print_user_lines(&rows);
    Ok(())
}

fn print_user(snapshot: &DashboardSnapshot, user_id: &str, json: bool) -> Result<()> {
    let mut nav = Navigator::new();
    nav.dispatch(NavEvent::SelectUser {
        user_id: user_id.to_string(),
    });

    let user = match nav.user_detail(snapshot) {
        UserDetail::Found(user) => user,
        UserDetail::NotFound => {
            if json {
                return print_json(&serde_json::json!({ "found": false, "user_id": user_id }));
            }
            println!("User not found");
            return Ok(());
        }
    };

    let rec = recommend_for(user);
    if json {
        return print_json(&UserReport {
            user,
            health_score: user.health_score(),
            health_band: user.health_band(),
            recommendation: rec,
        });
    }

    println!("=== {} ({}) ===", user.name, user.id);
    println!("  health:      {}% ({})", user.health_score(), user.health_band());
    println!("  email:       {}", user.email);
    println!("  company:     {}", user.company);
    println!("  plan:        {}", user.plan);
    println!("  CLV:         {}", format_money(Some(user.clv)));
    println!("  churn risk:  {:.0}%", user.churn_probability * 100.0);
    println!("  days active: {}", user.days_active);
    println!("  signed up:   {}", user.signup_date.format("%Y-%m-%d"));
    println!("  last login:  {}", user.last_login.format("%Y-%m-%d"));
    println!(
        "  features:    {} / {} / {}",
        user.feature_usage.feature1, user.feature_usage.feature2, user.feature_usage.feature3
    );

    println!();
    println!("  next best action: {} ({:.0}% confidence)", rec.action, rec.confidence * 100.0);
    println!("    {}", rec.message);
    println!("    best time: {} | {}", rec.best_time, rec.expected_impact);

    println!();
    for activity in &user.activities {
        println!(
            "  {} {:<16} {}",
            activity.timestamp.format("%Y-%m-%d %H:%M"),
            activity.kind.label(),
            activity.description
        );
    }
    Ok(())
}

fn print_segments(snapshot: &DashboardSnapshot, search: &str, json: bool) -> Result<()> {
    let segments = search_segments(&snapshot.segments, search);
    if json {
        return print_json(&segments);
    }
    for segment in segments {
        println!(
            "  {:<12} {:<36} {:>5} users | {} avg CLV",
            segment.name,
            segment.description,
            segment.user_count,
            segment.avg_clv_display()
        );
    }
    Ok(())
}

fn print_performance(snapshot: &DashboardSnapshot, range: Option<&str>, json: bool) -> Result<()> {
    let report = PerformanceReport {
        range: range.and_then(TimeRange::from_code).unwrap_or_default(),
        retention: retention_trend(),
        clv: clv_trend(),
        campaigns: campaign_rows(&snapshot.campaigns),
        totals: campaign_totals(&snapshot.campaigns),
    };
    if json {
        return print_json(&report);
    }

    println!("=== PERFORMANCE ({}) ===", report.range.label());
    println!("  retention rate");
    print_bars(&report.retention, |v| format!("{v:.0}%"));
    println!("  average CLV");
    print_bars(&report.clv, |v| format_money(Some(v.round() as i64)));

    println!();
    for row in &report.campaigns {
        println!(
            "  {:<22} {:<7} sent {:>4} | open {:>3}% | conv {:>3}% | +{}",
            row.name,
            row.channel.label(),
            row.sent_to,
            row.open_rate_pct,
            row.conversion_rate_pct,
            format_money(Some(row.revenue_impact))
        );
    }
    println!(
        "  total: {} campaigns, {} sent, +{} revenue",
        report.totals.campaigns,
        report.totals.sent_to,
        format_money(Some(report.totals.revenue_impact))
    );
    Ok(())
}

/// One bar per point, scaled to the series peak.
fn print_bars(points: &[TrendPoint], fmt_value: impl Fn(f64) -> String) {
    let peak = series_peak(points).filter(|p| *p > 0.0).unwrap_or(1.0);
    for p in points {
        let width = (p.value / peak * BAR_WIDTH).round() as usize;
        println!("    {} {:<24} {}", p.month, "#".repeat(width), fmt_value(p.value));
    }
}

fn print_campaign(snapshot: &DashboardSnapshot, campaign_id: &str, json: bool) -> Result<()> {
    let Some(campaign) = find_campaign(&snapshot.campaigns, campaign_id) else {
        log::warn!("Unknown campaign: {campaign_id:?}");
        println!("Campaign not found");
        return Ok(());
    };
    let segment = snapshot.segment_for(campaign);
    if json {
        return print_json(&CampaignReport { campaign, segment });
    }

    println!("=== {} ({}) ===", campaign.name, campaign.id);
    println!("  type:        {}", campaign.channel);
    println!("  status:      {:?}", campaign.status);
    println!(
        "  segment:     {}",
        segment.map_or("(unknown segment)", |s| s.name.as_str())
    );
    println!("  sent to:     {}", campaign.sent_to);
    println!("  open rate:   {:.0}%", campaign.open_rate * 100.0);
    println!("  conversion:  {:.0}%", campaign.conversion_rate * 100.0);
    println!("  revenue:     +{}", format_money(Some(campaign.revenue_impact)));
    println!("  created:     {}", campaign.created_at.format("%Y-%m-%d"));
    println!("  message:     {}", campaign.message);
    Ok(())
}

fn print_user_lines(users: &[&User]) {
    if users.is_empty() {
        println!("  (none)");
    }
    for u in users {
        println!(
            "  {:<9} {:<20} {:<24} {:<10} {:>8} | churn {:.2} | health {:>3}% {}",
            u.id,
            u.name,
            u.company,
            u.plan.label(),
            format_money(Some(u.clv)),
            u.churn_probability,
            u.health_score(),
            u.health_band()
        );
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    string_arg(args, flag).and_then(|v| v.parse().ok())
}
