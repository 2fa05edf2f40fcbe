use std::path::PathBuf;

use rusqlite::Connection;
use tempfile::TempDir;

use transitway_lib::{load_network, Error, NodeKind, ServiceId};

const SCHEMA: &str = "
    CREATE TABLE nodes (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        lat REAL NOT NULL,
        long REAL NOT NULL,
        kind TEXT NOT NULL
    );
    CREATE TABLE edge (
        source TEXT NOT NULL,
        destination TEXT NOT NULL,
        distance REAL NOT NULL,
        service INTEGER NOT NULL,
        kind TEXT NOT NULL
    );
";

const FIXTURE_ROWS: &str = "
    INSERT INTO nodes VALUES
        ('640123', 'Clementi Ave 4', 'Block 312', 1.3151, 103.7630, 'residential'),
        ('17171',  'Clementi Stn',   'Bus stop along Commonwealth Ave', 1.3149, 103.7652, 'bus_stop'),
        ('EW23',   'Clementi',       'East West line station', 1.3150, 103.7651, 'rail_station'),
        ('EW21',   'Buona Vista',    'East West line station', 1.3071, 103.7903, 'rail_station');
    INSERT INTO edge VALUES
        ('640123', '17171', 0.25, 0,  'walk'),
        ('17171',  '640123', 0.25, 0, 'walk'),
        ('17171',  'EW23',  0.05, 96, 'bus'),
        ('EW23',   'EW21',  2.80, 0,  'rail'),
        ('EW23',   'missing', 1.00, 0, 'walk');
";

/// Write a fixture database and hand back the tempdir guard with its path.
fn fixture_db(extra_sql: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("transit.db");
    let connection = Connection::open(&path).expect("create db");
    connection.execute_batch(SCHEMA).expect("schema");
    connection.execute_batch(extra_sql).expect("fixture rows");
    drop(connection);
    (dir, path)
}

#[test]
fn load_network_maps_rows_to_records() {
    let (_dir, path) = fixture_db(FIXTURE_ROWS);
    let network = load_network(&path).expect("network loads");

    assert_eq!(network.stops.len(), 4);
    // The edge pointing at an id absent from `nodes` drops out of the join.
    assert_eq!(network.records.len(), 4);

    let boarding = network
        .records
        .iter()
        .find(|r| r.source_id == "17171" && r.destination_id == "EW23")
        .expect("bus record present");
    assert_eq!(boarding.service, ServiceId(96));
    assert_eq!(boarding.distance, 0.05);
    assert_eq!(boarding.source_kind, NodeKind::BusStop);
    assert_eq!(boarding.destination_kind, NodeKind::RailStation);
}

#[test]
fn stop_lookup_by_id_and_name() {
    let (_dir, path) = fixture_db(FIXTURE_ROWS);
    let network = load_network(&path).expect("network loads");

    assert_eq!(
        network.stop_by_id("EW23").map(|s| s.name.as_str()),
        Some("Clementi")
    );
    assert_eq!(
        network.stop_by_name("Buona Vista").map(|s| s.id.as_str()),
        Some("EW21")
    );
    assert!(network.stop_by_id("nope").is_none());
    assert!(network.stop_by_name("Clementi Ave 9").is_none());
}

#[test]
fn stops_by_name_orders_the_directory() {
    let (_dir, path) = fixture_db(FIXTURE_ROWS);
    let network = load_network(&path).expect("network loads");

    let names: Vec<&str> = network
        .stops_by_name()
        .into_iter()
        .map(|stop| stop.name.as_str())
        .collect();
    assert_eq!(
        names,
        ["Buona Vista", "Clementi", "Clementi Ave 4", "Clementi Stn"]
    );
}

#[test]
fn fuzzy_matches_rank_similar_names() {
    let (_dir, path) = fixture_db(FIXTURE_ROWS);
    let network = load_network(&path).expect("network loads");

    let matches = network.fuzzy_stop_matches("Clemnti", 3);
    assert!(!matches.is_empty());
    assert_eq!(matches[0], "Clementi");

    let exact = network.fuzzy_stop_matches("Buona Vista", 3);
    assert_eq!(exact[0], "Buona Vista");

    assert!(network
        .fuzzy_stop_matches("Zzqxwv", 3)
        .is_empty(), "nothing similar should be suggested");
}

#[test]
fn missing_database_file_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.db");
    let error = load_network(&path).expect_err("must fail");
    assert!(matches!(error, Error::DatabaseNotFound { .. }));
}

#[test]
fn unknown_kind_string_is_fatal() {
    let (_dir, path) = fixture_db(
        "INSERT INTO nodes VALUES ('X1', 'Xramp', '', 0.0, 0.0, 'hoverport');",
    );
    let error = load_network(&path).expect_err("must fail");
    assert!(matches!(error, Error::InvalidRecord { .. }));
    assert!(error.to_string().contains("hoverport"));
}

#[test]
fn missing_column_surfaces_a_sqlite_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("transit.db");
    let connection = Connection::open(&path).expect("create db");
    connection
        .execute_batch("CREATE TABLE nodes (id TEXT); CREATE TABLE edge (source TEXT);")
        .expect("schema");
    drop(connection);

    let error = load_network(&path).expect_err("must fail");
    assert!(matches!(error, Error::Sqlite(_)));
}
