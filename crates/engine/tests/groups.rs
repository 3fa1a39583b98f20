use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use engine::{Engine, EngineError, Money};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

#[tokio::test]
async fn group_lifecycle() {
    let (mut engine, _db) = engine_with_db().await;

    let group_id = engine.new_group("Goa trip").await.unwrap();
    assert_eq!(engine.group(&group_id).unwrap().name, "Goa trip");

    engine.rename_group(&group_id, "Goa 2026").await.unwrap();
    assert_eq!(engine.group(&group_id).unwrap().name, "Goa 2026");

    engine.delete_group(&group_id).await.unwrap();
    assert_eq!(
        engine.group(&group_id).unwrap_err(),
        EngineError::KeyNotFound(group_id)
    );
}

#[tokio::test]
async fn dinner_split_three_ways() {
    let (mut engine, _db) = engine_with_db().await;
    let group_id = engine.new_group("Flat 4B").await.unwrap();

    let a = engine.add_member(&group_id, "A").await.unwrap();
    let b = engine.add_member(&group_id, "B").await.unwrap();
    let c = engine.add_member(&group_id, "C").await.unwrap();

    engine
        .add_expense(&group_id, "Dinner", Money::new(90), a)
        .await
        .unwrap();

    let summary = engine.summary(&group_id).unwrap();
    assert_eq!(summary.total, Money::new(90));
    assert_eq!(summary.per_person, Money::new(30));

    let balance_of = |id| {
        summary
            .balances
            .iter()
            .find(|row| row.member_id == id)
            .unwrap()
            .balance
            .minor()
    };
    assert_eq!(balance_of(a), 60);
    assert_eq!(balance_of(b), -30);
    assert_eq!(balance_of(c), -30);

    // Both debtors pay the single creditor, smaller id first.
    assert_eq!(summary.settlements.len(), 2);
    assert!(summary.settlements.iter().all(|t| t.to == a));
    assert!(
        summary
            .settlements
            .iter()
            .all(|t| t.amount == Money::new(30))
    );
    assert!(summary.settlements[0].from < summary.settlements[1].from);
}

#[tokio::test]
async fn deleting_the_expense_resets_the_summary() {
    let (mut engine, _db) = engine_with_db().await;
    let group_id = engine.new_group("Weekend").await.unwrap();

    let a = engine.add_member(&group_id, "A").await.unwrap();
    engine.add_member(&group_id, "B").await.unwrap();

    let expense_id = engine
        .add_expense(&group_id, "Dinner", Money::new(9000), a)
        .await
        .unwrap();
    assert!(!engine.summary(&group_id).unwrap().settlements.is_empty());

    engine.delete_expense(&group_id, expense_id).await.unwrap();

    let summary = engine.summary(&group_id).unwrap();
    assert_eq!(summary.total, Money::ZERO);
    assert!(summary.balances.iter().all(|row| row.balance.is_zero()));
    assert!(summary.settlements.is_empty());
}

#[tokio::test]
async fn update_expense_recomputes_balances() {
    let (mut engine, _db) = engine_with_db().await;
    let group_id = engine.new_group("Weekend").await.unwrap();

    let a = engine.add_member(&group_id, "A").await.unwrap();
    let b = engine.add_member(&group_id, "B").await.unwrap();

    let expense_id = engine
        .add_expense(&group_id, "Taxi", Money::new(100), a)
        .await
        .unwrap();

    engine
        .update_expense(&group_id, expense_id, "Taxi home", Money::new(200), b)
        .await
        .unwrap();

    let summary = engine.summary(&group_id).unwrap();
    assert_eq!(summary.total, Money::new(200));
    let row_b = summary
        .balances
        .iter()
        .find(|row| row.member_id == b)
        .unwrap();
    assert_eq!(row_b.balance, Money::new(100));

    let group = engine.group(&group_id).unwrap();
    let expense = &group.expenses[&expense_id];
    assert_eq!(expense.title, "Taxi home");
}

#[tokio::test]
async fn summary_of_memberless_group_fails() {
    let (mut engine, _db) = engine_with_db().await;
    let group_id = engine.new_group("Empty").await.unwrap();

    assert!(matches!(
        engine.summary(&group_id),
        Err(EngineError::EmptyGroup(_))
    ));
}

#[tokio::test]
async fn state_survives_engine_rebuild() {
    let (mut engine, db) = engine_with_db().await;
    let group_id = engine.new_group("Goa trip").await.unwrap();
    let a = engine.add_member(&group_id, "Asha").await.unwrap();
    engine.add_member(&group_id, "Bilal").await.unwrap();
    engine
        .add_expense(&group_id, "Hotel", Money::new(10000), a)
        .await
        .unwrap();

    drop(engine);
    let rebuilt = Engine::builder().database(db).build().await.unwrap();

    let group = rebuilt.group(&group_id).unwrap();
    assert_eq!(group.members.len(), 2);
    assert_eq!(group.expenses.len(), 1);

    let summary = rebuilt.summary(&group_id).unwrap();
    assert_eq!(summary.total, Money::new(10000));
    let row_a = summary
        .balances
        .iter()
        .find(|row| row.member_id == a)
        .unwrap();
    assert_eq!(row_a.balance, Money::new(5000));
}

#[tokio::test]
async fn failed_member_write_leaves_memory_unchanged() {
    let (mut engine, db) = engine_with_db().await;
    let group_id = engine.new_group("Goa trip").await.unwrap();

    db.execute_unprepared("DROP TABLE members").await.unwrap();

    let err = engine.add_member(&group_id, "Asha").await.unwrap_err();
    assert!(matches!(err, EngineError::Database(_)));
    assert!(engine.group(&group_id).unwrap().members.is_empty());
}

#[tokio::test]
async fn failed_expense_write_keeps_summary_stable() {
    let (mut engine, db) = engine_with_db().await;
    let group_id = engine.new_group("Weekend").await.unwrap();
    let a = engine.add_member(&group_id, "A").await.unwrap();
    engine.add_member(&group_id, "B").await.unwrap();
    let expense_id = engine
        .add_expense(&group_id, "Taxi", Money::new(100), a)
        .await
        .unwrap();

    db.execute_unprepared("DROP TABLE expenses").await.unwrap();

    assert!(
        engine
            .add_expense(&group_id, "Dinner", Money::new(90), a)
            .await
            .is_err()
    );
    assert!(
        engine
            .update_expense(&group_id, expense_id, "Taxi home", Money::new(200), a)
            .await
            .is_err()
    );
    assert!(engine.delete_expense(&group_id, expense_id).await.is_err());

    let group = engine.group(&group_id).unwrap();
    assert_eq!(group.expenses.len(), 1);
    assert_eq!(group.expenses[&expense_id].title, "Taxi");

    let summary = engine.summary(&group_id).unwrap();
    assert_eq!(summary.total, Money::new(100));
}

#[tokio::test]
async fn failed_group_delete_keeps_the_group_whole() {
    let (mut engine, db) = engine_with_db().await;
    let group_id = engine.new_group("Goa trip").await.unwrap();
    engine.add_member(&group_id, "Asha").await.unwrap();

    db.execute_unprepared("DROP TABLE expenses").await.unwrap();

    assert!(engine.delete_group(&group_id).await.is_err());
    assert_eq!(engine.group(&group_id).unwrap().members.len(), 1);
}

#[tokio::test]
async fn duplicate_member_name_is_rejected() {
    let (mut engine, _db) = engine_with_db().await;
    let group_id = engine.new_group("Flat 4B").await.unwrap();

    engine.add_member(&group_id, "Asha").await.unwrap();
    let err = engine.add_member(&group_id, "Asha").await.unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("Asha".to_string()));
}
