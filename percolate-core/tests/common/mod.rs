use std::sync::Arc;

use percolate_core::{AttributeValue, EdgeAttributes, GraphBuilder, NodeAttributes, RoadGraph};

/// Edge attributes with a travel time and a physical length.
#[must_use]
pub fn road(time: f64, length: f64) -> EdgeAttributes {
    EdgeAttributes::from([
        (Arc::from("time"), AttributeValue::Number(time)),
        (Arc::from("length"), AttributeValue::Number(length)),
    ])
}

/// Four towns on a line, `A -10- B -50- C -90- D`, with lengths ten times
/// the travel time, plus an isolated hub `E` in the north.
#[must_use]
pub fn corridor(with_hub: bool) -> RoadGraph {
    let mut builder = GraphBuilder::new("corridor");
    for id in ["A", "B", "C", "D"] {
        builder
            .add_node(id, NodeAttributes::default().with_region("South"))
            .expect("ids are unique");
    }
    if with_hub {
        builder
            .add_node("E", NodeAttributes::default().with_region("North"))
            .expect("ids are unique");
    }
    for (from, to, time) in [("A", "B", 10.0), ("B", "C", 50.0), ("C", "D", 90.0)] {
        builder
            .add_edge(from, to, road(time, time * 10.0))
            .expect("endpoints exist");
    }
    builder.build()
}
