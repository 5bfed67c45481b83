use percolate_core::{AttributeValue, GraphError, GraphSource, NodeKind, RoadGraph};
use rstest::rstest;

use crate::{TableError, TableGraphLoader, TableKind};

const NODES: &str = "\
id,population,region,country,kind,x,y,notes
A,1200,South,FR,city,2.35,48.85,capital
B,,South,FR,transport,,,
C,800,North,DE,City,13.4,52.5,
";

const EDGES: &str = "\
from,to,length,time,time_border,border,road
A,B,120.5,80,95,false,A6
B,C,600,300,,true,

C,A,900,520,560,true,NA
";

fn load(nodes: &str, edges: &str) -> Result<RoadGraph, TableError> {
    TableGraphLoader::new("europe").load_readers(nodes.as_bytes(), edges.as_bytes())
}

#[rstest]
fn loads_nodes_with_optional_attributes() {
    let graph = load(NODES, EDGES).expect("tables are valid");
    assert_eq!(graph.name(), "europe");
    assert_eq!(graph.node_count(), 3);

    let a = graph.nodes().first().expect("node A").attributes();
    assert_eq!(a.population(), Some(1200.0));
    assert_eq!(a.region(), Some("South"));
    assert_eq!(a.country(), Some("FR"));
    assert_eq!(a.kind(), Some(NodeKind::City));
    assert_eq!(a.coordinates(), Some((2.35, 48.85)));

    let b = graph.nodes().get(1).expect("node B").attributes();
    assert_eq!(b.population(), None);
    assert_eq!(b.kind(), Some(NodeKind::Transport));
    assert_eq!(b.coordinates(), None);
}

#[rstest]
fn loads_edges_with_typed_attributes_and_skips_blank_lines() {
    let graph = load(NODES, EDGES).expect("tables are valid");
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.endpoints(2).expect("edge 2"), (2, 0));
    assert_eq!(
        graph.attribute(0, "length").expect("length"),
        AttributeValue::Number(120.5)
    );
    assert_eq!(
        graph.attribute(1, "border").expect("border"),
        AttributeValue::Flag(true)
    );
    assert_eq!(
        graph.attribute(0, "road").expect("road"),
        AttributeValue::from("A6")
    );
    assert!(graph.attribute(1, "time_border").is_err());
    assert!(graph.attribute(2, "road").is_err());
}

#[rstest]
fn honours_custom_delimiters() {
    let graph = TableGraphLoader::new("tabs")
        .with_delimiter(b'\t')
        .load_readers("id\nA\nB\n".as_bytes(), "from\tto\ttime\nA\tB\t3\n".as_bytes())
        .expect("tab separated tables are valid");
    assert_eq!(graph.attribute(0, "time").expect("time"), AttributeValue::Number(3.0));
}

#[rstest]
fn accepts_windows_line_endings() {
    let graph = load("id\r\nA\r\nB\r\n", "from,to,time\r\nA,B,7\r\n").expect("valid tables");
    assert_eq!(graph.node_index("B"), Some(1));
    assert_eq!(graph.attribute(0, "time").expect("time"), AttributeValue::Number(7.0));
}

#[rstest]
#[case::no_id("name\nA\n", "from,to\n", TableKind::Nodes, "id")]
#[case::no_from("id\nA\n", "source,to\n", TableKind::Edges, "from")]
#[case::no_to("id\nA\n", "from,target\n", TableKind::Edges, "to")]
fn reports_missing_required_columns(
    #[case] nodes: &str,
    #[case] edges: &str,
    #[case] expected_table: TableKind,
    #[case] expected_column: &str,
) {
    let err = load(nodes, edges).expect_err("required column is absent");
    let TableError::MissingColumn { table, column } = err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(table, expected_table);
    assert_eq!(column, expected_column);
}

#[rstest]
fn reports_ragged_rows_with_line_numbers() {
    let err = load("id,region\nA,South\nB\n", "from,to\n").expect_err("row 3 is short");
    assert!(matches!(
        err,
        TableError::RaggedRow {
            table: TableKind::Nodes,
            line: 3,
            expected: 2,
            found: 1,
        }
    ));
    assert_eq!(err.line(), Some(3));
}

#[rstest]
fn rejects_empty_tables() {
    assert!(matches!(
        load("", "from,to\n"),
        Err(TableError::MissingHeader {
            table: TableKind::Nodes
        })
    ));
    assert!(matches!(load("id\n\n", "from,to\n"), Err(TableError::EmptyNodeTable)));
}

#[rstest]
#[case::population("id,population\nA,many\n", "population")]
#[case::coordinate("id,x,y\nA,1.0,north\n", "y")]
fn rejects_malformed_numeric_node_columns(#[case] nodes: &str, #[case] expected: &str) {
    let err = load(nodes, "from,to\n").expect_err("value is not a number");
    let TableError::InvalidNumber { line, column, .. } = err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(line, 2);
    assert_eq!(column, expected);
}

#[rstest]
fn rejects_half_specified_coordinates() {
    let err = load("id,x,y\nA,1.0,\n", "from,to\n").expect_err("y is missing");
    assert!(matches!(err, TableError::PartialCoordinates { line: 2 }));
}

#[rstest]
fn rejects_unknown_node_kinds() {
    let err = load("id,kind\nA,village\n", "from,to\n").expect_err("kind is unknown");
    assert!(matches!(err, TableError::InvalidKind { line: 2, .. }));
    assert!(err.to_string().contains("village"));
}

#[rstest]
fn wraps_graph_errors_with_table_and_line() {
    let err = load("id\nA\nA\n", "from,to\n").expect_err("duplicate id");
    assert!(matches!(
        err,
        TableError::Graph {
            table: TableKind::Nodes,
            line: 3,
            source: GraphError::DuplicateNode { .. },
        }
    ));

    let err = load("id\nA\n", "from,to\nA,Z\n").expect_err("unknown endpoint");
    assert!(matches!(
        err,
        TableError::Graph {
            table: TableKind::Edges,
            line: 2,
            source: GraphError::UnknownNode { .. },
        }
    ));
    assert_eq!(err.to_string(), "edge table line 2: edge references unknown node `Z`");
}
