use uuid::Uuid;

/// Short prefixed identifier, e.g. `plan_1f0c2a9b4d3e` or `txn_8e11b0a2c4f6`.
pub fn prefixed_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &hex[..12])
}

/// Provider reference carrying a resource-type code, e.g. `HTL-9F0C2A1B`.
/// The code makes references visually attributable to their resource type.
pub fn provider_ref(type_code: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}-{}", type_code, hex[..8].to_uppercase())
}
