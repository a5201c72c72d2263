//! End-to-end checks of the projection engine through the public API

use cashflow::models::{
    Account, AccountType, Category, Expense, Income, Money, MoneyEvent, MonthPeriod, Recurrence,
    Transfer,
};
use cashflow::reports::{
    AccountForecast, CategoryBreakdown, ForecastReport, MonthlyOverview, TrendReport,
};
use cashflow::services::{normalize_to_monthly, occurs_in_month, AggregationPolicy};
use cashflow::storage::Ledger;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn month(y: i32, m: u32) -> MonthPeriod {
    MonthPeriod::new(y, m).unwrap()
}

fn household() -> Ledger {
    let checking = Account::with_balance("Checking", AccountType::Checking, Money::new(dec!(800)));
    let savings = Account::with_balance("Savings", AccountType::Savings, Money::new(dec!(5000)));
    let housing = Category::new("Housing");
    let food = Category::new("Food");

    let mut ledger = Ledger::new();
    ledger.incomes.push(Income::new(
        checking.id,
        "Salary",
        MoneyEvent::new(Money::new(dec!(3200)), Recurrence::Monthly, date(2024, 1, 25)),
    ));
    ledger.incomes.push(Income::new(
        checking.id,
        "Bonus",
        MoneyEvent::new(Money::new(dec!(12000.00)), Recurrence::Yearly, date(2024, 3, 15)),
    ));
    ledger.expenses.push(
        Expense::new(
            checking.id,
            "Rent",
            MoneyEvent::new(Money::new(dec!(1200.00)), Recurrence::Monthly, date(2024, 1, 1)),
        )
        .with_category(housing.id),
    );
    ledger.expenses.push(
        Expense::new(
            checking.id,
            "Lunch",
            MoneyEvent::new(Money::new(dec!(10.00)), Recurrence::Daily, date(2024, 6, 1)),
        )
        .with_category(food.id),
    );
    ledger.expenses.push(Expense::new(
        checking.id,
        "Insurance",
        MoneyEvent::new(Money::new(dec!(240)), Recurrence::Quarterly, date(2024, 2, 1)),
    ));
    ledger.transfers.push(Transfer::new(
        checking.id,
        savings.id,
        "Sweep",
        MoneyEvent::new(Money::new(dec!(500)), Recurrence::Monthly, date(2024, 1, 1)),
    ));
    ledger.categories.extend([housing, food]);
    ledger.accounts.extend([checking, savings]);
    ledger
}

#[test]
fn june_overview_counts_daily_expense_by_calendar_days() {
    let ledger = household();
    let overview = MonthlyOverview::generate(&ledger, month(2024, 6), AggregationPolicy::default());
    assert_eq!(overview.total_expenses, Money::new(dec!(1500.00)));

    let may = MonthlyOverview::generate(&ledger, month(2024, 5), AggregationPolicy::default());
    assert_eq!(may.total_expenses, Money::new(dec!(1440.00)));
}

#[test]
fn yearly_income_contributes_every_forecast_month() {
    let ledger = household();
    let forecast =
        ForecastReport::generate(&ledger, 12, month(2024, 3), AggregationPolicy::default())
            .unwrap();
    assert!(forecast
        .months
        .iter()
        .all(|m| m.income == Money::new(dec!(4200.00))));
}

#[test]
fn quarterly_from_february() {
    let insurance =
        MoneyEvent::new(Money::new(dec!(240)), Recurrence::Quarterly, date(2024, 2, 1));
    for m in [2, 5, 8, 11] {
        assert!(!occurs_in_month(&insurance, m, 2024).is_zero());
    }
    for m in [3, 4] {
        assert!(occurs_in_month(&insurance, m, 2024).is_zero());
    }
}

#[test]
fn normalizer_identities() {
    for amount in [dec!(0.01), dec!(42), dec!(99999.99)] {
        assert!(normalize_to_monthly(Money::new(amount), &Recurrence::Once).is_zero());
        assert_eq!(
            normalize_to_monthly(Money::new(amount), &Recurrence::Monthly),
            Money::new(amount)
        );
    }
}

#[test]
fn breakdown_percentages_add_up() {
    let ledger = household();
    let report = CategoryBreakdown::generate(
        &ledger,
        date(2024, 1, 1),
        date(2024, 12, 31),
        AggregationPolicy::default(),
    )
    .unwrap();

    let sum: Decimal = report.categories.iter().map(|c| c.percentage).sum();
    assert!((sum - dec!(100)).abs() <= dec!(0.05));
    assert_eq!(report.categories[0].category_name, "Housing");
    assert!(report
        .categories
        .windows(2)
        .all(|w| w[0].amount >= w[1].amount));
}

#[test]
fn trend_and_forecast_meet_at_reference() {
    let ledger = household();
    let reference = month(2024, 6);
    let trend = TrendReport::generate(&ledger, 3, reference, AggregationPolicy::default()).unwrap();
    let forecast =
        ForecastReport::generate(&ledger, 3, reference, AggregationPolicy::default()).unwrap();

    assert_eq!(trend.points.last().unwrap().period, reference);
    assert_eq!(Some(forecast.months.first().unwrap().period), reference.next());
}

#[test]
fn savings_account_accumulates_sweeps() {
    let ledger = household();
    let forecasts =
        AccountForecast::generate_all(&ledger, 4, month(2024, 6), AggregationPolicy::exact())
            .unwrap();

    let savings = forecasts
        .iter()
        .find(|f| f.account_name == "Savings")
        .unwrap();
    let balances: Vec<Money> = savings.months.iter().map(|m| m.balance).collect();
    assert_eq!(
        balances,
        vec![
            Money::new(dec!(5500)),
            Money::new(dec!(6000)),
            Money::new(dec!(6500)),
            Money::new(dec!(7000)),
        ]
    );

    let checking = forecasts
        .iter()
        .find(|f| f.account_name == "Checking")
        .unwrap();
    assert!(checking.months.iter().all(|m| m.balance == m.net));
}

#[test]
fn ledger_round_trips_through_json() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("ledger.json");
    let ledger = household();
    ledger.save(&path).unwrap();

    let loaded = Ledger::load(&path).unwrap();
    let before = MonthlyOverview::generate(&ledger, month(2024, 8), AggregationPolicy::default());
    let after = MonthlyOverview::generate(&loaded, month(2024, 8), AggregationPolicy::default());
    assert_eq!(before, after);
}
