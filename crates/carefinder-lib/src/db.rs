//! SQLite network storage.
//!
//! Networks are stored in three tables read in rowid order, so the facility
//! registry keeps the order rows were inserted in:
//!
//! - `Areas(name, isFacility)`: every graph node, with its facility flag
//! - `Roads(fromArea, toArea, distance)`
//! - `Facilities(name, areaName, location, rating)`: the registry
//!
//! Facility marks come from `Areas.isFacility` only. Registry rows neither
//! create nor mark nodes, so a registry record may name an area the graph
//! lacks and simply never ranks.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::finder::CareFinder;
use crate::graph::AreaGraph;
use crate::registry::{FacilityRecord, FacilityRegistry};

/// DDL for an empty network database.
pub const NETWORK_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Areas (
    name TEXT PRIMARY KEY NOT NULL,
    isFacility INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS Roads (
    fromArea TEXT NOT NULL,
    toArea TEXT NOT NULL,
    distance REAL NOT NULL
);
CREATE TABLE IF NOT EXISTS Facilities (
    name TEXT PRIMARY KEY NOT NULL,
    areaName TEXT NOT NULL,
    location TEXT NOT NULL DEFAULT '',
    rating REAL NOT NULL
);
";

/// Load a network from a SQLite database file.
pub fn load_network_db(db_path: &Path) -> Result<CareFinder> {
    if !db_path.exists() {
        return Err(Error::NetworkNotFound {
            path: db_path.to_path_buf(),
        });
    }
    let connection = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    debug!(path = %db_path.display(), "loading SQLite network");
    load_network_from_connection(&connection)
}

/// Load a network from an open connection.
pub fn load_network_from_connection(connection: &Connection) -> Result<CareFinder> {
    let mut graph = AreaGraph::new();

    let mut stmt = connection.prepare("SELECT name, isFacility FROM Areas ORDER BY rowid")?;
    let areas = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?))
    })?;
    for area in areas {
        let (name, is_facility) = area?;
        if is_facility {
            graph.add_node(name.as_str());
            graph.mark_facility(&name)?;
        } else {
            graph.add_node(name);
        }
    }

    let mut stmt =
        connection.prepare("SELECT fromArea, toArea, distance FROM Roads ORDER BY rowid")?;
    let roads = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, f64>(2)?,
        ))
    })?;
    for road in roads {
        let (from, to, distance) = road?;
        graph.add_edge(&from, &to, distance)?;
    }

    let mut stmt = connection
        .prepare("SELECT name, areaName, location, rating FROM Facilities ORDER BY rowid")?;
    let facilities = stmt.query_map([], |row| {
        Ok(FacilityRecord {
            name: row.get(0)?,
            node: row.get(1)?,
            location: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            rating: row.get(3)?,
        })
    })?;

    let mut registry = FacilityRegistry::new();
    for facility in facilities {
        registry.push(facility?)?;
    }

    info!(
        nodes = graph.node_count(),
        roads = graph.edge_count(),
        facilities = graph.facility_count(),
        "loaded area network"
    );
    Ok(CareFinder::new(graph, registry))
}

/// Write `finder` into `connection`, creating the schema if needed.
///
/// Every node is written with its facility flag, and each road once per
/// undirected pair of adjacency entries, so loading the result back yields
/// the same graph and registry.
pub fn write_network(connection: &mut Connection, finder: &CareFinder) -> Result<()> {
    connection.execute_batch(NETWORK_SCHEMA)?;
    let tx = connection.transaction()?;
    {
        let graph = finder.graph();
        let mut insert_area =
            tx.prepare("INSERT OR IGNORE INTO Areas (name, isFacility) VALUES (?1, ?2)")?;
        let mut insert_road =
            tx.prepare("INSERT INTO Roads (fromArea, toArea, distance) VALUES (?1, ?2, ?3)")?;
        for name in graph.node_names() {
            insert_area.execute(rusqlite::params![name, graph.is_facility(&name)])?;
        }

        // Each road appears in both endpoint lists; keep the copy whose source sorts first.
        // Self-loops appear twice in the same list, so only every other copy is kept.
        for name in graph.node_names() {
            let mut self_loops = 0usize;
            for edge in graph.neighbours(&name) {
                let keep = match name.as_str().cmp(edge.target.as_str()) {
                    std::cmp::Ordering::Less => true,
                    std::cmp::Ordering::Equal => {
                        self_loops += 1;
                        self_loops % 2 == 1
                    }
                    std::cmp::Ordering::Greater => false,
                };
                if keep {
                    insert_road.execute(rusqlite::params![name, edge.target, edge.distance])?;
                }
            }
        }

        let mut insert_facility = tx.prepare(
            "INSERT INTO Facilities (name, areaName, location, rating) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for record in finder.registry().iter() {
            insert_facility.execute(rusqlite::params![
                record.name,
                record.node,
                record.location,
                record.rating
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::FacilitySearch;

    #[test]
    fn loads_tables_in_rowid_order() {
        let connection = Connection::open_in_memory().unwrap();
        connection.execute_batch(NETWORK_SCHEMA).unwrap();
        connection
            .execute_batch(
                "INSERT INTO Areas (name) VALUES ('A'), ('Lonely');
                 INSERT INTO Areas (name, isFacility) VALUES ('Clinic', 1), ('B', 1);
                 INSERT INTO Roads VALUES ('A', 'B', 2.0), ('B', 'Clinic', 3.0);
                 INSERT INTO Facilities VALUES ('Zed Clinic', 'Clinic', 'Main St', 4.5);
                 INSERT INTO Facilities VALUES ('Alpha Clinic', 'B', 'Side St', 3.0);",
            )
            .unwrap();

        let finder = load_network_from_connection(&connection).unwrap();
        assert_eq!(finder.list_areas(), vec!["A", "Lonely"]);
        let names: Vec<_> = finder.registry().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zed Clinic", "Alpha Clinic"]);
        assert!(finder.graph().is_facility("B"));
    }

    #[test]
    fn registry_rows_do_not_create_or_mark_nodes() {
        let connection = Connection::open_in_memory().unwrap();
        connection.execute_batch(NETWORK_SCHEMA).unwrap();
        connection
            .execute_batch(
                "INSERT INTO Roads VALUES ('A', 'B', 2.0);
                 INSERT INTO Facilities VALUES ('Ghost Clinic', 'Nowhere', '', 4.0);
                 INSERT INTO Facilities VALUES ('B Clinic', 'B', '', 4.0);",
            )
            .unwrap();

        let finder = load_network_from_connection(&connection).unwrap();
        assert!(!finder.graph().contains("Nowhere"));
        assert!(!finder.graph().is_facility("B"));
        assert_eq!(finder.list_areas(), vec!["A", "B"]);
        assert_eq!(finder.unmatched_facilities().len(), 1);
    }

    #[test]
    fn facility_marks_survive_without_registry_records() {
        let mut graph = AreaGraph::new();
        graph.add_edge("A", "Clinic", 2.0).unwrap();
        graph.mark_facility("Clinic").unwrap();
        let finder = CareFinder::new(graph, FacilityRegistry::new());
        assert!(finder.nearest_facility("A").found().is_some());

        let mut connection = Connection::open_in_memory().unwrap();
        write_network(&mut connection, &finder).unwrap();
        let loaded = load_network_from_connection(&connection).unwrap();

        assert!(loaded.graph().is_facility("Clinic"));
        assert_eq!(loaded.list_areas(), vec!["A"]);
        let found = loaded.nearest_facility("A").into_found().expect("facility found");
        assert_eq!(found.facility, "Clinic");
        assert_eq!(found.total_distance, 2.0);
    }

    #[test]
    fn unmatched_registry_records_round_trip_without_new_nodes() {
        let mut graph = AreaGraph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        let registry =
            FacilityRegistry::from_records([FacilityRecord::new("Ghost", "Nowhere", "", 3.0)])
                .unwrap();
        let finder = CareFinder::new(graph, registry);

        let mut connection = Connection::open_in_memory().unwrap();
        write_network(&mut connection, &finder).unwrap();
        let loaded = load_network_from_connection(&connection).unwrap();

        assert_eq!(loaded.graph().node_count(), 2);
        assert_eq!(loaded.list_areas(), vec!["A", "B"]);
        assert_eq!(loaded.registry().len(), 1);
        assert!(matches!(
            loaded.nearest_facility("A"),
            FacilitySearch::NoFacilityReachable
        ));
    }

    #[test]
    fn negative_road_fails_the_load() {
        let connection = Connection::open_in_memory().unwrap();
        connection.execute_batch(NETWORK_SCHEMA).unwrap();
        connection
            .execute_batch("INSERT INTO Roads VALUES ('A', 'B', -1.0);")
            .unwrap();

        assert!(matches!(
            load_network_from_connection(&connection),
            Err(Error::InvalidEdgeWeight { .. })
        ));
    }

    #[test]
    fn missing_tables_surface_sqlite_errors() {
        let connection = Connection::open_in_memory().unwrap();
        assert!(matches!(
            load_network_from_connection(&connection),
            Err(Error::Sqlite(_))
        ));
    }

    #[test]
    fn written_network_loads_back_with_same_roads() {
        let mut graph = AreaGraph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("B", "A", 4.0).unwrap();
        graph.add_edge("C", "C", 0.5).unwrap();
        graph.mark_facility("B").unwrap();
        let registry =
            FacilityRegistry::from_records([FacilityRecord::new("B Clinic", "B", "", 4.0)])
                .unwrap();
        let finder = CareFinder::new(graph, registry);

        let mut connection = Connection::open_in_memory().unwrap();
        write_network(&mut connection, &finder).unwrap();
        let loaded = load_network_from_connection(&connection).unwrap();

        assert_eq!(loaded.graph().edge_count(), 3);
        assert_eq!(loaded.list_areas(), vec!["A", "C"]);
        assert_eq!(loaded.distances_from("A").get("B"), Some(1.0));
    }
}
