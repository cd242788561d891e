//! Small database files for tests.

use rusqlite::{params, Connection};
use std::path::Path;
use tempfile::TempDir;

use super::schema::SCHEMA;
use super::Database;

/// (session, expression, illumination, occlusion, purpose) recorded for
/// every client of the corpus.
const RECORDINGS: &[(&str, &str, &str, &str, &str)] = &[
    ("first", "neutral", "front", "none", "enrol"),
    ("first", "smile", "front", "none", "probe"),
    ("second", "anger", "front", "none", "probe"),
    ("first", "neutral", "left", "none", "probe"),
    ("second", "neutral", "front", "sunglasses", "probe"),
    ("second", "neutral", "left", "scarf", "probe"),
];

const PROTOCOLS: &[(&str, &str, &str, &str)] = &[
    ("all", "neutral", "front", "none"),
    ("all", "smile", "front", "none"),
    ("all", "anger", "front", "none"),
    ("all", "neutral", "left", "none"),
    ("all", "neutral", "front", "sunglasses"),
    ("all", "neutral", "left", "scarf"),
    ("expression", "smile", "front", "none"),
    ("expression", "anger", "front", "none"),
    ("illumination", "neutral", "left", "none"),
    ("occlusion", "neutral", "front", "sunglasses"),
    ("occlusion_and_illumination", "neutral", "left", "scarf"),
];

pub(crate) const CLIENTS: &[(&str, &str, &str)] = &[
    ("m-101", "world", "m"),
    ("w-101", "world", "w"),
    ("m-001", "dev", "m"),
    ("w-001", "dev", "w"),
    ("m-002", "eval", "m"),
    ("w-002", "eval", "w"),
];

fn create(path: &Path) -> Connection {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn
}

fn open(dir: TempDir, path: &Path) -> (TempDir, Database) {
    let db = Database::open_at(path).unwrap();
    assert!(db.is_valid());
    (dir, db)
}

/// Six clients, six recordings each, and rules for every protocol.
pub(crate) fn corpus() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arface.sql3");
    {
        let conn = create(&path);
        let mut file_id = 0i64;
        for (client_id, group, gender) in CLIENTS {
            conn.execute(
                "INSERT INTO client (id, sgroup, gender) VALUES (?, ?, ?)",
                params![client_id, group, gender],
            )
            .unwrap();
            for (n, (session, expression, illumination, occlusion, purpose)) in
                RECORDINGS.iter().enumerate()
            {
                file_id += 1;
                conn.execute(
                    r#"
                    INSERT INTO file (id, client_id, path, purpose, session, expression, illumination, occlusion)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                    params![
                        file_id,
                        client_id,
                        format!("{}/{}-{:02}", session, client_id, n + 1),
                        purpose,
                        session,
                        expression,
                        illumination,
                        occlusion
                    ],
                )
                .unwrap();
            }
        }
        for (name, expression, illumination, occlusion) in PROTOCOLS {
            conn.execute(
                "INSERT INTO protocol (name, expression, illumination, occlusion) VALUES (?, ?, ?, ?)",
                params![name, expression, illumination, occlusion],
            )
            .unwrap();
        }
    }
    open(dir, &path)
}

/// Client A (dev, m) with one enrolment file f1 = 1, client B (eval, w) with
/// one probe file f2 = 2, and a single `all` rule covering f2.
pub(crate) fn two_clients() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arface.sql3");
    {
        let conn = create(&path);
        conn.execute_batch(
            r#"
            INSERT INTO client (id, sgroup, gender) VALUES ('A', 'dev', 'm');
            INSERT INTO client (id, sgroup, gender) VALUES ('B', 'eval', 'w');
            INSERT INTO file (id, client_id, path, purpose, session, expression, illumination, occlusion)
                VALUES (1, 'A', 'A/f1', 'enrol', 'first', 'smile', 'left', 'scarf');
            INSERT INTO file (id, client_id, path, purpose, session, expression, illumination, occlusion)
                VALUES (2, 'B', 'B/f2', 'probe', 'first', 'neutral', 'front', 'none');
            INSERT INTO protocol (name, expression, illumination, occlusion)
                VALUES ('all', 'neutral', 'front', 'none');
            "#,
        )
        .unwrap();
    }
    open(dir, &path)
}
