//! # kwartvoorbier
//!
//! Console rehearsal of a borrel: seeds the tables from the configuration, evaluates the
//! ordering window and acts on the phase it finds.
//!
//! ```bash
//! kwartvoorbier --at 15:50            # window open: place demo orders, show pickup list
//! kwartvoorbier --at 15:30 --watch    # count down, take orders, draw at closing time
//! kwartvoorbier --config borrel.toml  # real clock, custom window and catalogue
//! ```

use anyhow::Context;
use chrono::{Datelike, Local, NaiveTime};
use clap::Parser;
use kwartvoorbier::clock::{OffsetClock, SharedClock, SystemClock};
use kwartvoorbier::config::{KvbConfig, SeedConfig};
use kwartvoorbier::lifecycle::{setup_tracing, BorrelSystem};
use kwartvoorbier::lottery::{self, Draw};
use kwartvoorbier::model::{LocationCreate, OrderCreate, ProductCreate, ProfileCreate};
use kwartvoorbier::window::{Phase, PhaseView, SchedulerEvent};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use table_actor::TableAccess;
use tokio::sync::{broadcast::error::RecvError, watch};
use tracing::{info, warn, Instrument};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// TOML configuration file. `KVB_*` environment variables override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretend it is this time today (HH:MM). The clock runs on from there.
    #[arg(long, value_parser = parse_time)]
    at: Option<NaiveTime>,

    /// Keep polling the window until Ctrl-C, drawing the lottery when ordering closes.
    #[arg(long)]
    watch: bool,
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

/// Catalogue used when the configuration doesn't bring one.
fn demo_seed() -> SeedConfig {
    let every_day = 0..=6;
    SeedConfig {
        products: vec![
            ProductCreate::new("Pils", every_day.clone()),
            ProductCreate::new("Witbier", every_day.clone()),
            ProductCreate::new("Alcoholvrij", every_day),
        ],
        locations: vec![
            LocationCreate::new("Kantine", 0),
            LocationCreate::new("Dakterras", 5),
        ],
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let args = Args::parse();

    let mut config = KvbConfig::load(args.config.as_deref())?;
    if config.seed.products.is_empty() && config.seed.locations.is_empty() {
        config.seed = demo_seed();
    }

    let clock: SharedClock = match args.at {
        Some(time) => Arc::new(OffsetClock::starting_at(Local::now().date_naive().and_time(time))),
        None => Arc::new(SystemClock),
    };

    let system = BorrelSystem::new(clock, config.tables.buffer_size);
    system.seed(&config).await.context("seeding tables")?;
    info!(window = %config.window, "System ready");

    let mut scheduler = system.scheduler(&config.scheduler);
    let view = scheduler.tick().await;
    report(&view);

    match view.phase {
        Phase::Ordering { .. } => {
            place_demo_orders(&system)
                .instrument(tracing::info_span!("demo_orders"))
                .await?;
            print_pickup(&system).await?;
        }
        Phase::Lottery { .. } => announce(&system, config.scheduler.reveal_delay()).await?,
        Phase::AwaitingWindow { .. } | Phase::Closed(_) => {}
    }

    if args.watch {
        let (stop, stopped) = watch::channel(false);
        let mut events = scheduler.events();
        let mut views = scheduler.view();
        let task = tokio::spawn(scheduler.run(stopped));

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                changed = views.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = views.borrow_and_update().clone();
                    if let Some(remaining) = view.remaining {
                        println!("Ordering opens in {remaining} ({:.0}%)", view.fill_ratio * 100.0);
                    }
                }
                event = events.recv() => match event {
                    Ok(SchedulerEvent::CountdownCompleted { .. }) => println!("Ordering is open!"),
                    Ok(SchedulerEvent::PhaseChanged { to, .. }) => {
                        println!("Now: {to}");
                        match to {
                            Phase::Ordering { .. } => {
                                place_demo_orders(&system)
                                    .instrument(tracing::info_span!("demo_orders"))
                                    .await?;
                            }
                            Phase::Lottery { .. } => {
                                print_pickup(&system).await?;
                                announce(&system, config.scheduler.reveal_delay()).await?;
                            }
                            _ => {}
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => warn!(skipped, "Missed scheduler events"),
                    Err(RecvError::Closed) => break,
                }
            }
        }

        let _ = stop.send(true);
        task.await.context("scheduler task")?;
    } else {
        drop(scheduler);
    }

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Application completed successfully");
    Ok(())
}

fn report(view: &PhaseView) {
    match view.phase {
        Phase::AwaitingWindow { opens_at } => {
            let remaining = view.remaining.unwrap_or_default();
            println!("Ordering opens at {} (in {remaining})", opens_at.format("%H:%M"));
        }
        Phase::Ordering { closes_at } => {
            println!("Ordering is open until {}", closes_at.format("%H:%M"));
        }
        Phase::Lottery { ends_at } => {
            println!("Ordering closed, lottery until {}", ends_at.format("%H:%M"));
        }
        Phase::Closed(reason) => println!("Closed: {reason}"),
    }
}

/// Three colleagues order whatever is on today, cycling through the locations.
async fn place_demo_orders(system: &BorrelSystem) -> anyhow::Result<()> {
    let weekday = system.clock().now().weekday().num_days_from_sunday();
    let products = system.products.available_on(weekday).await?;
    let locations = system.locations.list().await?;
    if products.is_empty() || locations.is_empty() {
        warn!("Nothing to order or nowhere to deliver");
        return Ok(());
    }

    let people = [
        ProfileCreate::member("Ana"),
        ProfileCreate::member("Bo"),
        ProfileCreate {
            email: Some("cas@kantoor.nl".into()),
            ..Default::default()
        },
    ];
    for (i, person) in people.into_iter().enumerate() {
        let user_id = system.profiles.create_profile(person).await?;
        let order = OrderCreate {
            user_id,
            product_id: products[i % products.len()].id,
            location_id: locations[i % locations.len()].id,
        };
        match system.place_order(order).await {
            Ok(order_id) => info!(%order_id, %user_id, "Order placed"),
            Err(e) => warn!(error = %e, %user_id, "Order refused"),
        }
    }
    Ok(())
}

async fn print_pickup(system: &BorrelSystem) -> anyhow::Result<()> {
    let summary = system.pickup_summary(None).await?;
    println!("{} drink(s) to fetch:", summary.total);
    for line in &summary.per_product {
        println!("  {:>2} x {}", line.count, line.name);
    }
    for order in &summary.orders {
        println!("  - {} ({})", order.customer_name, order.location_id);
    }
    Ok(())
}

async fn announce(system: &BorrelSystem, delay: Duration) -> anyhow::Result<()> {
    let participants = system.todays_participants().await?;
    println!("Drawing from {} participant(s)...", participants.len());
    match lottery::reveal(&participants, system.today(), delay).await {
        Draw::Winner { name, .. } => println!("{name} fetches the drinks!"),
        Draw::NotEnoughParticipants { count } => {
            println!("No lottery today: {count} participant(s)")
        }
    }
    Ok(())
}
