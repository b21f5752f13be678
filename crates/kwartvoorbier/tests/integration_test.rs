use chrono::{Duration, NaiveDate, NaiveDateTime};
use kwartvoorbier::clock::ManualClock;
use kwartvoorbier::config::KvbConfig;
use kwartvoorbier::lifecycle::{BorrelSystem, SystemError};
use kwartvoorbier::lottery::Draw;
use kwartvoorbier::model::{
    LocationCreate, OrderCreate, ProductCreate, ProfileCreate, ProfileId,
};
use kwartvoorbier::order_actor::OrderError;
use kwartvoorbier::window::{ClosedReason, Phase, WindowConfig};
use std::sync::Arc;
use table_actor::TableAccess;

fn thursday(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 4)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn config() -> KvbConfig {
    let mut config = KvbConfig::default();
    config.seed.products = vec![
        ProductCreate::new("Pils", [4, 5]),
        ProductCreate::new("Witbier", [5]),
    ];
    config.seed.locations = vec![LocationCreate::new("Kantine", 0)];
    config
}

async fn start(at: NaiveDateTime) -> (BorrelSystem, ManualClock) {
    let clock = ManualClock::new(at);
    let system = BorrelSystem::new(Arc::new(clock.clone()), 16);
    system.seed(&config()).await.unwrap();
    (system, clock)
}

async fn order_for(system: &BorrelSystem, user_id: ProfileId) -> Result<(), SystemError> {
    let product = system.products.list().await?[0].id;
    let location = system.locations.list().await?[0].id;
    system
        .place_order(OrderCreate {
            user_id,
            product_id: product,
            location_id: location,
        })
        .await
        .map(|_| ())
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let (system, _clock) = start(thursday(12, 0)).await;
    system.seed(&config()).await.unwrap();

    assert_eq!(system.products.list().await.unwrap().len(), 2);
    assert_eq!(system.locations.list().await.unwrap().len(), 1);
    assert_eq!(
        system.settings.read_window().await.unwrap(),
        Some(WindowConfig::default())
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_orders_only_while_window_is_open() {
    let (system, clock) = start(thursday(15, 30)).await;
    let ana = system
        .profiles
        .create_profile(ProfileCreate::member("Ana"))
        .await
        .unwrap();

    let early = order_for(&system, ana).await.unwrap_err();
    assert!(matches!(
        early,
        SystemError::OrderingClosed(Phase::AwaitingWindow { .. })
    ));

    clock.set(thursday(15, 50));
    order_for(&system, ana).await.unwrap();

    clock.set(thursday(16, 5));
    let late = order_for(&system, ana).await.unwrap_err();
    assert!(matches!(late, SystemError::OrderingClosed(Phase::Lottery { .. })));

    clock.set(thursday(16, 20));
    assert_eq!(
        system.current_phase().await.unwrap(),
        Phase::Closed(ClosedReason::WindowPassed)
    );

    assert_eq!(system.orders.list().await.unwrap().len(), 1);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_errors_pass_through() {
    let (system, _clock) = start(thursday(15, 50)).await;
    let location = system.locations.list().await.unwrap()[0].id;
    // Witbier is Friday only.
    let witbier = system.products.list().await.unwrap()[1].id;

    let err = system
        .place_order(OrderCreate {
            user_id: ProfileId(99),
            product_id: witbier,
            location_id: location,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SystemError::Order(OrderError::ProductUnavailable(ref name)) if name == "Witbier"
    ));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_lottery_draws_from_todays_orders() {
    let (system, clock) = start(thursday(15, 46)).await;
    let ana = system
        .profiles
        .create_profile(ProfileCreate::member("Ana"))
        .await
        .unwrap();
    let bo = system
        .profiles
        .create_profile(ProfileCreate::member("Bo"))
        .await
        .unwrap();

    order_for(&system, ana).await.unwrap();
    clock.advance(Duration::minutes(1));
    order_for(&system, bo).await.unwrap();
    clock.advance(Duration::minutes(1));
    order_for(&system, ana).await.unwrap();

    clock.set(thursday(16, 1));
    // Newest first, one entry per person.
    assert_eq!(
        system.todays_participants().await.unwrap(),
        vec!["Ana".to_string(), "Bo".to_string()]
    );
    assert_eq!(
        system.draw_lottery().await.unwrap(),
        Draw::Winner {
            name: "Ana".into(),
            index: 0,
            seed: -918_178_961
        }
    );

    // The next day starts without participants.
    clock.set(thursday(16, 1) + Duration::days(1));
    assert_eq!(
        system.draw_lottery().await.unwrap(),
        Draw::NotEnoughParticipants { count: 0 }
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_window_edit_applies_immediately() {
    let (system, _clock) = start(thursday(16, 10)).await;
    assert!(matches!(
        system.current_phase().await.unwrap(),
        Phase::Lottery { .. }
    ));

    let later = WindowConfig {
        start_hour: 16,
        start_minute: 0,
        end_hour: 16,
        end_minute: 30,
    };
    system.settings.write_window(&later).await.unwrap();

    assert_eq!(
        system.current_phase().await.unwrap(),
        Phase::Ordering {
            closes_at: thursday(16, 30)
        }
    );

    let backwards = WindowConfig {
        end_hour: 15,
        ..later
    };
    system.settings.write_window(&backwards).await.unwrap();
    assert_eq!(
        system.current_phase().await.unwrap(),
        Phase::Closed(ClosedReason::InvalidWindow)
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_pickup_summary_for_today() {
    let (system, clock) = start(thursday(15, 50)).await;
    for name in ["Ana", "Bo", "Cas"] {
        let id = system
            .profiles
            .create_profile(ProfileCreate::member(name))
            .await
            .unwrap();
        order_for(&system, id).await.unwrap();
        clock.advance(Duration::seconds(30));
    }
    let first = system.orders.list().await.unwrap()[2].id;
    system.orders.set_delivered(first, true).await.unwrap();

    let summary = system.pickup_summary(None).await.unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.per_product[0].name, "Pils");
    assert_eq!(summary.per_product[0].count, 3);
    assert_eq!(summary.outstanding(), 2);
    let names: Vec<&str> = summary
        .orders
        .iter()
        .map(|o| o.customer_name.as_str())
        .collect();
    assert_eq!(names, vec!["Cas", "Bo", "Ana"]);

    system.shutdown().await.unwrap();
}
