//! Demo driver: builds the reference five-vertex graph and prints the three
//! analyses, one line each.

use flowgraph::graph::{GraphError, VertexId, WeightedDigraph};

fn main() {
    env_logger::init();

    let mut source: VertexId = 4;
    let mut sink: VertexId = 2;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--source" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                source = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--sink" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                sink = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--help" | "-h" => usage_and_exit(0),
            _ => usage_and_exit(2),
        }
    }

    let graph = match build_demo_graph() {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("failed to build demo graph: {e}");
            std::process::exit(1);
        }
    };

    for component in graph.kosaraju() {
        println!("strongly connected component: {}", join(&component));
    }

    match graph.max_flow(source, sink) {
        Ok(flow) => println!("maximum flow {source} -> {sink}: {flow}"),
        Err(e) => {
            eprintln!("flow computation failed: {e}");
            std::process::exit(1);
        }
    }

    println!("maximum clique: {}", join(&graph.find_max_clique()));
}

/// The fixed demo scenario: five vertices, six weighted arcs.
fn build_demo_graph() -> Result<WeightedDigraph, GraphError> {
    let mut graph = WeightedDigraph::new();
    for vertex in 0..5 {
        graph.add_vertex(vertex);
    }
    graph.add_edge(0, 2, 5.0)?;
    graph.add_edge(1, 0, 4.0)?;
    graph.add_edge(2, 1, 1.0)?;
    graph.add_edge(3, 1, 5.0)?;
    graph.add_edge(3, 4, 1.0)?;
    graph.add_edge(4, 3, 11.0)?;
    Ok(graph)
}

fn join(vertices: &[VertexId]) -> String {
    vertices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  flowgraph [--source V] [--sink V]\n\nOptions:\n  --source V   Flow source vertex (default: 4)\n  --sink V     Flow sink vertex (default: 2)\n"
    );
    std::process::exit(code)
}
