#![warn(rust_2018_idioms)]

//! Command line front end: reads a graph, rewrites it
//! and reports on the result.

use clap::Parser;
use std::{
    fs,
    path::{Path, PathBuf},
};

use trivalent::{
    census::grow,
    debug::{print_canonical, print_faces, print_rotation_system},
    parser::parse_graph,
    time, time_mut, Error, Graph, Move, MoveKind,
};

#[derive(Parser, Debug)]
#[command(
    name = "trivalent",
    about = "Rewrite moves and isomorphism tests on trivalent rotation systems"
)]
pub struct Settings {
    /// Graph in the plain text format.
    input: PathBuf,
    /// Moves applied in the given order, e.g. `one:3` or `flip!:2`.
    #[arg(short, long = "move", value_name = "MOVE")]
    moves: Vec<Move>,
    /// Print the rotation at every vertex.
    #[arg(long)]
    rotations: bool,
    /// Print the canonical form.
    #[arg(long)]
    canonical: bool,
    /// Print all faces.
    #[arg(long)]
    faces: bool,
    /// Compare against a second graph.
    #[arg(long, value_name = "GRAPH_FILE")]
    compare: Option<PathBuf>,
    /// Count all graphs reachable with at most this many vertices.
    #[arg(long, value_name = "MAX_VERTICES")]
    census: Option<usize>,
    /// Moves used by the census, all of them if not given.
    #[arg(long, value_delimiter = ',')]
    census_moves: Vec<MoveKind>,
}

fn read_graph(path: &Path) -> Result<Graph, Error> {
    let text = fs::read_to_string(path)?;
    parse_graph(&text)
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<(), Error> {
    env_logger::init();
    let settings = Settings::parse();

    time_mut!(read_time, graph, read_graph(&settings.input)?);
    log::info!("read {} in {:?}", settings.input.display(), read_time);

    for &change in &settings.moves {
        let touched = graph.apply(change)?;
        log::info!(
            "{} touched edges {:?}",
            change,
            touched
                .iter()
                .filter_map(|&edge| graph.position_of(edge))
                .collect::<Vec<_>>()
        );
    }
    print!("{}", graph);

    if settings.rotations {
        print_rotation_system(&graph);
    }

    if settings.canonical {
        time!(canonical_time, form, graph.canonical_form());
        log::info!("canonical form in {:?}", canonical_time);
        print_canonical(form)?;
    }

    if settings.faces {
        let faces = graph.find_faces();
        print_faces(&graph, &faces);
    }

    if let Some(path) = &settings.compare {
        let other = read_graph(path)?;
        time!(compare_time, isomorphism, graph.isomorphism(&other));
        log::info!("comparison in {:?}", compare_time);
        match isomorphism {
            Some(isomorphism) => println!(
                "isomorphic, vertices {:?}, edges {:?}",
                isomorphism.vertices, isomorphism.edges
            ),
            None => println!("not isomorphic"),
        }
    }

    if let Some(max_vertices) = settings.census {
        let kinds = if settings.census_moves.is_empty() {
            MoveKind::ALL.to_vec()
        } else {
            settings.census_moves.clone()
        };
        time!(census_time, census, grow(&graph, &kinds, max_vertices));
        log::info!("census in {:?}", census_time);
        println!("census: {} graphs", census.len());
    }

    Ok(())
}
