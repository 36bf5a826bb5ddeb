//! GraphML export for graph viewers.
//!
//! Node ids are the grid NodeIds. Node data: `row`, `col`, `elevation` and
//! the display position as `x`, `y`. Edge data: `weight`, `distance`.

use std::io::{self, Write};

use dem_graph::Graph;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">
  <key id="d0" for="node" attr.name="row" attr.type="int"/>
  <key id="d1" for="node" attr.name="col" attr.type="int"/>
  <key id="d2" for="node" attr.name="elevation" attr.type="double"/>
  <key id="d3" for="node" attr.name="x" attr.type="double"/>
  <key id="d4" for="node" attr.name="y" attr.type="double"/>
  <key id="d5" for="edge" attr.name="weight" attr.type="double"/>
  <key id="d6" for="edge" attr.name="distance" attr.type="double"/>
  <graph edgedefault="undirected">
"#;

const FOOTER: &str = "  </graph>\n</graphml>\n";

/// Write `graph` as a GraphML document.
pub fn write_graphml<W: Write>(graph: &Graph, mut out: W) -> io::Result<()> {
    out.write_all(HEADER.as_bytes())?;

    for node in graph.nodes() {
        let (x, y) = node.display_position();
        writeln!(out, "    <node id=\"{}\">", node.id)?;
        writeln!(out, "      <data key=\"d0\">{}</data>", node.row)?;
        writeln!(out, "      <data key=\"d1\">{}</data>", node.col)?;
        writeln!(out, "      <data key=\"d2\">{}</data>", node.elevation)?;
        writeln!(out, "      <data key=\"d3\">{x}</data>")?;
        writeln!(out, "      <data key=\"d4\">{y}</data>")?;
        writeln!(out, "    </node>")?;
    }

    for edge in graph.edges() {
        writeln!(
            out,
            "    <edge source=\"{}\" target=\"{}\">",
            edge.a, edge.b
        )?;
        writeln!(out, "      <data key=\"d5\">{}</data>", edge.weight)?;
        writeln!(out, "      <data key=\"d6\">{}</data>", edge.distance())?;
        writeln!(out, "    </edge>")?;
    }

    out.write_all(FOOTER.as_bytes())?;
    out.flush()
}

/// Render `graph` as a GraphML string.
pub fn to_graphml_string(graph: &Graph) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_graphml(graph, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
