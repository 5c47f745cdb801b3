pub const SCHEMA: &str = r#"
-- One JSON document per entity kind (store_shops, store_products, ...)
CREATE TABLE IF NOT EXISTS collections (
    kind TEXT PRIMARY KEY,
    document TEXT NOT NULL,
    updated_at TEXT DEFAULT (datetime('now'))
);
"#;
