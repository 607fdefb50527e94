use uuid::Uuid;

/// Genera un nuovo id di messaggio unico (UUIDv4).
pub fn new_message_id() -> Uuid {
    Uuid::new_v4()
}

/// Accetta solo la forma canonica a 36 caratteri (8-4-4-4-12, maiuscole o minuscole).
/// Le forme semplice, `urn:uuid:` e tra graffe sono rifiutate.
pub fn parse_message_id(raw: &str) -> Option<Uuid> {
    let bytes = raw.as_bytes();
    if bytes.len() != 36 {
        return None;
    }
    let hyphens_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 8 | 13 | 18 | 23) == (*b == b'-'));
    if !hyphens_ok {
        return None;
    }
    Uuid::try_parse(raw).ok()
}
