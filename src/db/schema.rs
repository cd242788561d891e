/// Layout of the database file. The file is produced by an external loader;
/// this crate only ever reads it.
pub const SCHEMA: &str = r#"
-- Clients: subjects of the database
CREATE TABLE IF NOT EXISTS client (
    id TEXT PRIMARY KEY,
    sgroup TEXT NOT NULL,   -- 'world', 'dev' or 'eval'
    gender TEXT NOT NULL    -- 'm' or 'w'
);

CREATE INDEX IF NOT EXISTS idx_client_sgroup ON client(sgroup);

-- Files: one recorded image each
CREATE TABLE IF NOT EXISTS file (
    id INTEGER PRIMARY KEY,
    client_id TEXT NOT NULL,
    path TEXT NOT NULL UNIQUE,    -- relative path without extension
    purpose TEXT NOT NULL,        -- 'enrol' or 'probe'
    session TEXT NOT NULL,        -- 'first' or 'second'
    expression TEXT NOT NULL,     -- 'neutral', 'smile', 'anger', 'scream'
    illumination TEXT NOT NULL,   -- 'front', 'left', 'right', 'all'
    occlusion TEXT NOT NULL,      -- 'none', 'sunglasses', 'scarf'
    FOREIGN KEY (client_id) REFERENCES client(id)
);

CREATE INDEX IF NOT EXISTS idx_file_client ON file(client_id);
CREATE INDEX IF NOT EXISTS idx_file_purpose ON file(purpose);

-- Protocol rules: the (expression, illumination, occlusion) triples in scope
-- for each protocol name
CREATE TABLE IF NOT EXISTS protocol (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    expression TEXT NOT NULL,
    illumination TEXT NOT NULL,
    occlusion TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_protocol_name ON protocol(name);
"#;
