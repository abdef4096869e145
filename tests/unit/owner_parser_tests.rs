/*!
 * Tests for owner-record parsing over extracted document lines
 */

use egrul_resolver::owner_parser::{
    LOOKUP_WINDOW, OwnerKind, find_identifier_near, find_share_near, parse_owners,
};

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// Test the fixed-offset person block layout
#[test]
fn test_parse_owners_withPersonBlock_shouldExtractFullName() {
    let doc = lines(&[
        "ФАМИЛИЯ",
        "Иванов",
        "Имя",
        "Иван",
        "Отчество",
        "Иванович",
    ]);

    let owners = parse_owners(&doc);

    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].kind, OwnerKind::Person);
    assert_eq!(owners[0].name, "Иванов Иван Иванович");
    assert_eq!(owners[0].identifier, None);
}

/// Test that the cursor jumps exactly one block: two back-to-back person
/// blocks must both be found, and the boilerplate lines of the first block
/// must not be rescanned
#[test]
fn test_parse_owners_withConsecutivePersonBlocks_shouldAdvanceCursorPastBlock() {
    let doc = lines(&[
        "ФАМИЛИЯ",
        "Иванов",
        "Имя",
        "Иван",
        "Отчество",
        "Иванович",
        "ФАМИЛИЯ",
        "Петров",
        "Имя",
        "Пётр",
        "Отчество",
        "Петрович",
    ]);

    let owners = parse_owners(&doc);

    assert_eq!(owners.len(), 2);
    assert_eq!(owners[0].name, "Иванов Иван Иванович");
    assert_eq!(owners[1].name, "Петров Пётр Петрович");
}

/// Test that a person marker is case-insensitive and tolerant of padding
#[test]
fn test_parse_owners_withLowercasePaddedMarker_shouldStillMatch() {
    let doc = lines(&["  фамилия  ", "Сидоров", "Имя", "Олег", "Отчество", "Олегович"]);

    let owners = parse_owners(&doc);

    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].name, "Сидоров Олег Олегович");
}

/// Test the person share association
#[test]
fn test_parse_owners_withShareSection_shouldAttachShareValue() {
    let doc = lines(&[
        "ФАМИЛИЯ",
        "Иванов",
        "Имя",
        "Иван",
        "Отчество",
        "Иванович",
        "Номинальная стоимость доли",
        "50000",
    ]);

    let owners = parse_owners(&doc);

    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].share_value.as_deref(), Some("50000"));
}

/// Test organization detection for each legal-form token
#[test]
fn test_parse_owners_withEachLegalForm_shouldDetectOrganization() {
    for org_line in ["ООО \"Ромашка\"", "АО Вектор", "ПАО Газопровод"] {
        let doc = lines(&[org_line, "ИНН 1234567890"]);
        let owners = parse_owners(&doc);

        assert_eq!(owners.len(), 1, "missed organization in '{}'", org_line);
        assert_eq!(owners[0].kind, OwnerKind::Organization);
        assert_eq!(owners[0].name, org_line);
        assert_eq!(owners[0].identifier.as_deref(), Some("1234567890"));
    }
}

/// Test that legal-form tokens only match as whole words
#[test]
fn test_parse_owners_withTokenInsideWord_shouldNotMatch() {
    let doc = lines(&["САОЗВУЧИЕ без формы"]);
    assert!(parse_owners(&doc).is_empty());
}

/// Test mixed documents keep line order
#[test]
fn test_parse_owners_withMixedRecords_shouldPreserveDocumentOrder() {
    let doc = lines(&[
        "ООО Первое",
        "ИНН 1111111111",
        "ФАМИЛИЯ",
        "Иванов",
        "Имя",
        "Иван",
        "Отчество",
        "Иванович",
        "АО Второе",
        "ИНН 2222222222",
    ]);

    let owners = parse_owners(&doc);

    assert_eq!(owners.len(), 3);
    assert_eq!(owners[0].kind, OwnerKind::Organization);
    assert_eq!(owners[1].kind, OwnerKind::Person);
    assert_eq!(owners[2].kind, OwnerKind::Organization);
    assert_eq!(owners[2].identifier.as_deref(), Some("2222222222"));
}

/// Test the inline identifier form on the line after the anchor
#[test]
fn test_find_identifier_near_withInlineLabel_shouldReturnDigits() {
    let doc = lines(&["Some ORG ООО", "ИНН 1234567890", "X"]);
    assert_eq!(
        find_identifier_near(&doc, 0, LOOKUP_WINDOW).as_deref(),
        Some("1234567890")
    );
}

/// Test the bare-label identifier form, digits on the following line
#[test]
fn test_find_identifier_near_withLabelOnOwnLine_shouldReadFollowingLine() {
    let doc = lines(&["ООО Тест", "ИНН", "500912345678"]);
    assert_eq!(
        find_identifier_near(&doc, 0, LOOKUP_WINDOW).as_deref(),
        Some("500912345678")
    );
}

/// Test backward search when the identifier precedes the name line
#[test]
fn test_find_identifier_near_withIdentifierBeforeAnchor_shouldSearchBackward() {
    let doc = lines(&["ИНН 7701234567", "прочий текст", "ООО Тест"]);
    assert_eq!(
        find_identifier_near(&doc, 2, LOOKUP_WINDOW).as_deref(),
        Some("7701234567")
    );
}

/// Test that the digit run must be 10 to 12 digits long
#[test]
fn test_find_identifier_near_withShortDigitRun_shouldReturnNone() {
    let doc = lines(&["ООО Тест", "ИНН 12345"]);
    assert_eq!(find_identifier_near(&doc, 0, LOOKUP_WINDOW), None);
}

/// Test the window bound: an identifier past the window must not be found
#[test]
fn test_find_identifier_near_withIdentifierPastWindow_shouldReturnNone() {
    let mut doc = vec!["ООО Далеко".to_string()];
    for _ in 0..LOOKUP_WINDOW {
        doc.push("наполнитель".to_string());
    }
    doc.push("ИНН 1234567890".to_string());

    assert_eq!(find_identifier_near(&doc, 0, LOOKUP_WINDOW), None);
}

/// Test forward-only share lookup
#[test]
fn test_find_share_near_withLabelBlock_shouldReturnFollowingDigits() {
    let doc = lines(&["...", "Номинальная стоимость доли", "50000"]);
    assert_eq!(find_share_near(&doc, 0, LOOKUP_WINDOW).as_deref(), Some("50000"));
}

/// Test that share lookup never searches backward
#[test]
fn test_find_share_near_withLabelBeforeAnchor_shouldReturnNone() {
    let doc = lines(&["Номинальная стоимость доли", "50000", "якорь"]);
    assert_eq!(find_share_near(&doc, 2, LOOKUP_WINDOW), None);
}

/// Test serialization shape consumed by the calling layer
#[test]
fn test_owner_record_serialization_withPerson_shouldUseCamelCaseFields() {
    let doc = lines(&[
        "ФАМИЛИЯ",
        "Иванов",
        "Имя",
        "Иван",
        "Отчество",
        "Иванович",
        "Номинальная стоимость доли",
        "50000",
    ]);
    let owners = parse_owners(&doc);

    let json = serde_json::to_value(&owners[0]).unwrap();
    assert_eq!(json["name"], "Иванов Иван Иванович");
    assert_eq!(json["identifier"], serde_json::Value::Null);
    assert_eq!(json["shareValue"], "50000");
    assert!(json.get("kind").is_none());
}
