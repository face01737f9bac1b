use coworkers_core::{
    Company, CompanyAttributes, CoworkerParams, Member, MemberAttributes, Space,
};
use uuid::Uuid;

#[test]
fn member_serialization_uses_expected_wire_fields() {
    let company_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut company = Company::new("GB", 1);
    company.id = Some(company_id);
    let attributes = MemberAttributes::new("John")
        .with_phone_no("1234")
        .with_email("random@example.com");
    let mut member = Member::build(&attributes, &company, &Space::new(1, "Factory"));
    member.is_boss = true;

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["id"], serde_json::Value::Null);
    assert_eq!(json["name"], "John");
    assert_eq!(json["phone_no"], "1234");
    assert_eq!(json["email"], "random@example.com");
    assert_eq!(json["company_id"], company_id.to_string());
    assert_eq!(json["space_id"], 1);
    assert_eq!(json["is_boss"], true);

    let decoded: Member = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, member);
}

#[test]
fn attributes_decode_from_raw_mappings() {
    let member: MemberAttributes = serde_json::from_value(serde_json::json!({
        "name": "Mr. Invalid"
    }))
    .unwrap();
    assert_eq!(member, MemberAttributes::new("Mr. Invalid"));

    let company: CompanyAttributes = serde_json::from_value(serde_json::json!({
        "name": "Group Buddies",
        "space_id": 1
    }))
    .unwrap();
    assert_eq!(company.space_id, Some(1));

    let params = CoworkerParams::new(member, company).unwrap();
    assert_eq!(params.company().name, "Group Buddies");
    assert_eq!(params.member().phone_no, None);
}

#[test]
fn member_defaults_to_not_boss_when_flag_is_absent() {
    let decoded: Member = serde_json::from_value(serde_json::json!({
        "id": null,
        "name": "John",
        "phone_no": null,
        "email": null,
        "company_id": null,
        "space_id": 1
    }))
    .unwrap();
    assert!(!decoded.is_boss);
    assert!(!decoded.is_valid());
}
