//! Human-readable order numbers handed out from the `orderNumber` counter.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{LockType, OnConflict};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QuerySelect, Set, TransactionTrait};

use crate::{
    db::OrmConn,
    entity::counters::{ActiveModel as CounterActive, Column as CounterCol, Entity as Counters},
};

pub const ORDER_NUMBER_COUNTER: &str = "orderNumber";
pub const FIRST_ORDER_NUMBER: i64 = 1001;

/// Returns the next order number. Never fails: when the counter cannot be
/// read or written, a timestamp-derived number is returned instead so that
/// checkout is not blocked. Fallback numbers are not guaranteed unique.
pub async fn next_order_number(orm: &OrmConn) -> i64 {
    match increment_counter(orm).await {
        Ok(number) => number,
        Err(err) => {
            let number = fallback_order_number(Utc::now());
            tracing::warn!(error = %err, fallback = number, "order counter unavailable");
            number
        }
    }
}

/// Increments the counter under a row lock so concurrent checkouts never
/// receive the same number.
async fn increment_counter(orm: &OrmConn) -> Result<i64, DbErr> {
    let txn = orm.begin().await?;

    Counters::insert(CounterActive {
        name: Set(ORDER_NUMBER_COUNTER.to_string()),
        current_number: Set(FIRST_ORDER_NUMBER - 1),
    })
    .on_conflict(OnConflict::column(CounterCol::Name).do_nothing().to_owned())
    .do_nothing()
    .exec(&txn)
    .await?;

    let counter = Counters::find_by_id(ORDER_NUMBER_COUNTER.to_string())
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(ORDER_NUMBER_COUNTER.to_string()))?;

    let next = counter.current_number + 1;
    let mut active: CounterActive = counter.into();
    active.current_number = Set(next);
    active.update(&txn).await?;

    txn.commit().await?;
    Ok(next)
}

pub fn fallback_order_number(now: DateTime<Utc>) -> i64 {
    1000 + now.timestamp().rem_euclid(100_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fallback_stays_in_range() {
        let now = Utc.timestamp_opt(1_700_000_123, 0).unwrap();
        assert_eq!(fallback_order_number(now), 1000 + 123);

        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(fallback_order_number(epoch), 1000);
    }
}
