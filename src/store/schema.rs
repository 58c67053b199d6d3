/// Schema for the local store.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS heros (
    identifier TEXT PRIMARY KEY NOT NULL,
    name TEXT,
    info TEXT,
    photo TEXT,
    favorite INTEGER
);

CREATE INDEX IF NOT EXISTS idx_heros_name ON heros(name);

CREATE TABLE IF NOT EXISTS transformations (
    identifier TEXT PRIMARY KEY NOT NULL,
    name TEXT,
    info TEXT,
    photo TEXT,
    hero_id TEXT REFERENCES heros(identifier) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_transformations_hero ON transformations(hero_id);

CREATE TABLE IF NOT EXISTS locations (
    identifier TEXT PRIMARY KEY NOT NULL,
    latitude TEXT,
    longitude TEXT,
    date TEXT,
    hero_id TEXT REFERENCES heros(identifier) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_locations_hero ON locations(hero_id);
"#;
