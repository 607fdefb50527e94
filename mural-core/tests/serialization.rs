use mural_core::*;
use serde_json::{self as json, Value};
use time::macros::datetime;
use uuid::Uuid;

fn parse(json_str: &str) -> Value {
    json::from_str(json_str).expect("valid json")
}

fn sample_message() -> Message {
    Message {
        id: Uuid::parse_str("2b18bacd-10bf-4017-bf75-1325fb249e58").expect("uuid"),
        author: "Ana".to_string(),
        content: "hi".to_string(),
        created_at: datetime!(2025-11-02 10:20:30.123456789 UTC),
        like_count: 0,
    }
}

/*
    Obiettivo test: verificare che Message venga serializzato con i campi in camelCase,
    id come UUID canonico e createdAt in RFC3339, e che torni indietro identico.
*/
#[test]
fn message_wire_format_is_camel_case() {
    let m = sample_message();
    let s = json::to_string(&m).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["id"], "2b18bacd-10bf-4017-bf75-1325fb249e58");
    assert_eq!(v["author"], "Ana");
    assert_eq!(v["content"], "hi");
    assert_eq!(v["createdAt"], "2025-11-02T10:20:30.123456789Z");
    assert_eq!(v["likeCount"], 0);
    assert!(v["created_at"].is_null(), "snake_case must not leak on the wire");

    let back: Message = json::from_str(&s).expect("deserialize");
    assert_eq!(back, m);
}

/*
    Obiettivo test: un client che invia id/createdAt/likeCount in POST non deve far fallire il parsing;
    quei campi vengono semplicemente ignorati.
*/
#[test]
fn register_request_ignores_server_owned_fields() {
    let body = r#"{
        "id": "13735fd3-6584-46a0-86b8-004bc8257227",
        "author": "José",
        "content": "conteúdo da mensagem",
        "likeCount": 99,
        "createdAt": "2020-01-01T00:00:00Z"
    }"#;
    let req: RegisterMessageRequest = json::from_str(body).expect("deserialize");
    assert_eq!(
        req,
        RegisterMessageRequest { author: "José".to_string(), content: "conteúdo da mensagem".to_string() }
    );
}

/*
    Obiettivo test: il body di PUT può essere un Message completo (id presente)
    oppure solo il contenuto (id assente -> None).
*/
#[test]
fn alter_request_accepts_full_message_or_content_only() {
    let full = json::to_string(&sample_message()).expect("serialize");
    let req: AlterMessageRequest = json::from_str(&full).expect("deserialize full message");
    assert_eq!(req.id, Some(sample_message().id));
    assert_eq!(req.author.as_deref(), Some("Ana"));
    assert_eq!(req.content, "hi");

    let req: AlterMessageRequest = json::from_str(r#"{"content":"bye"}"#).expect("deserialize");
    assert_eq!(req.id, None);
    assert_eq!(req.author, None);

    let s = json::to_string(&req).expect("serialize");
    assert_eq!(parse(&s), json::json!({"content": "bye"}));
}

#[test]
fn alter_request_rejects_malformed_id() {
    let res = json::from_str::<AlterMessageRequest>(r#"{"id":"not-a-uuid","content":"x"}"#);
    assert!(res.is_err());
}

#[test]
fn alter_request_accepts_only_the_hyphenated_id() {
    let simple = r#"{"id":"b09ab50ba7ca45bca0e81655bc59c3f9","content":"x"}"#;
    assert!(json::from_str::<AlterMessageRequest>(simple).is_err());
    let urn = r#"{"id":"urn:uuid:b09ab50b-a7ca-45bc-a0e8-1655bc59c3f9","content":"x"}"#;
    assert!(json::from_str::<AlterMessageRequest>(urn).is_err());

    let req: AlterMessageRequest =
        json::from_str(r#"{"id":"B09AB50B-A7CA-45BC-A0E8-1655BC59C3F9","content":"x"}"#)
            .expect("uppercase hyphenated id");
    let expected = Uuid::parse_str("b09ab50b-a7ca-45bc-a0e8-1655bc59c3f9").unwrap();
    assert_eq!(req.id, Some(expected));

    let without: AlterMessageRequest = json::from_str(r#"{"content":"x"}"#).expect("no id");
    assert_eq!(without.id, None);
}

/*
    Obiettivo test: l'envelope paginato espone content, totalElements e totalPages (più i metadati)
    e calcola correttamente il numero di pagine.
*/
#[test]
fn page_envelope_on_empty_store() {
    let page: Page<Message> = Page::new(vec![], PageRequest::default(), 0);
    let v = parse(&json::to_string(&page).expect("serialize"));

    assert_eq!(v["content"], json::json!([]));
    assert_eq!(v["totalElements"], 0);
    assert_eq!(v["totalPages"], 0);
    assert_eq!(v["number"], 0);
    assert_eq!(v["size"], 10);
    assert_eq!(v["empty"], true);
    assert_eq!(v["first"], true);
    assert_eq!(v["last"], true);
}

#[test]
fn page_envelope_counts_partial_last_page() {
    let req = PageRequest::new(2, 10).expect("size");
    let page = Page::new(vec![sample_message(); 5], req, 25);

    assert_eq!(page.total_pages, 3);
    assert_eq!(page.number_of_elements, 5);
    assert!(!page.first);
    assert!(page.last);
    assert!(!page.empty);

    let first = Page::new(vec![sample_message(); 10], PageRequest::new(0, 10).expect("size"), 20);
    assert_eq!(first.total_pages, 2);
    assert!(first.first);
    assert!(!first.last);
}

#[test]
fn page_query_applies_defaults() {
    let q: PageQuery = json::from_str("{}").expect("deserialize");
    assert_eq!(q.into_request(), Some(PageRequest::default()));

    let q = PageQuery { page: Some(3), size: None };
    let req = q.into_request().expect("valid");
    assert_eq!((req.page(), req.size(), req.offset()), (3, DEFAULT_PAGE_SIZE, 30));
}
