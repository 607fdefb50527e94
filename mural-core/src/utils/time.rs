use time::OffsetDateTime;

/// Restituisce l'istante corrente in UTC.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
