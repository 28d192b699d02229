//! Debug facilities.
use itertools::Itertools;
use nom::error::{VerboseError, VerboseErrorKind};
use std::{
    fmt::{self, Debug},
    io::{self, Write},
};

use crate::{
    canonical::CanonicalForm,
    colour::Colour,
    faces::Face,
    graph::{EdgeId, Graph, Slot, VertexIndex},
    parser::ParseError,
};

// Error types and From<...> implementations

/// A request that is malformed on its own,
/// independent of the state of the graph.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("number of vertices must be a positive even integer, got {0}")]
    VertexCount(usize),
    #[error("cannot allocate a graph with {0} vertices")]
    VertexAllocation(usize),
    #[error("number of added vertices must be a positive integer")]
    AddedVertices,
    #[error("vertex label {label} must be between 0 and {}", .num_vert.saturating_sub(1))]
    VertexLabel { label: usize, num_vert: usize },
    #[error("edge label {label} must be below {num_edges}")]
    EdgeLabel { label: usize, num_edges: usize },
    #[error("unknown edge handle {0:?}")]
    EdgeHandle(EdgeId),
    #[error("edge entries have 2 to 5 fields, got {0}")]
    EdgeArity(usize),
    #[error("vertex labels are non-negative, got {0}")]
    NegativeLabel(i64),
    #[error("orientation must be +1 or -1, got {0}")]
    Orientation(i64),
    #[error("colour must be a positive integer, got {0}")]
    Colour(i64),
    #[error("edge {0} is a self-loop")]
    SelfLoop(usize),
    #[error("colour table level must be at least 4, got {0}")]
    Level(u32),
    #[error("not a permutation of 0..{0}")]
    Permutation(usize),
    #[error("unknown move `{0}`")]
    UnknownMove(String),
}

impl From<std::convert::Infallible> for InputError {
    #[cfg(not(tarpaulin_include))]
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// A well-formed request that would break the semantics of the graph.
/// Raised before anything is committed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("vertex {0} already trivalent")]
    Trivalent(VertexIndex),
    #[error("vertex {0} would become a source or a sink")]
    SourceOrSink(VertexIndex),
    #[error("colours {colours:?} at vertex {vertex} are not admissible")]
    InadmissibleColours {
        vertex: VertexIndex,
        colours: [Colour; 3],
    },
    #[error("edge {edge:?} is not incident to vertex {vertex}")]
    NotIncident { vertex: VertexIndex, edge: EdgeId },
    #[error("edge {edge:?} is already connected to vertex {vertex}")]
    AlreadyConnected { vertex: VertexIndex, edge: EdgeId },
    #[error("vertex {0} already disconnected")]
    Disconnected(VertexIndex),
    #[error("vertex {0} is not trivalent")]
    NotTrivalent(VertexIndex),
    #[error("flipping edge {0:?} would create a multiple edge or a self-loop")]
    MultiEdge(EdgeId),
    #[error("both sides of edge {0:?} lie on the same face")]
    FaceCollision(EdgeId),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Malformed request")]
    Input(InputError),
    #[error("Graph invariant violated")]
    Invariant(InvariantViolation),
    #[error("Error while parsing input file with graph description")]
    ParseError(Vec<VerboseErrorKind>),
    #[error("Error while reading input")]
    IoError(io::Error),
}

impl From<InputError> for Error {
    #[cfg(not(tarpaulin_include))]
    fn from(ie: InputError) -> Self {
        Self::Input(ie)
    }
}

impl From<InvariantViolation> for Error {
    #[cfg(not(tarpaulin_include))]
    fn from(iv: InvariantViolation) -> Self {
        Self::Invariant(iv)
    }
}

#[cfg(not(tarpaulin_include))]
fn handle_nom_verbose_error<E: Debug>(verbose: VerboseError<E>) -> Vec<VerboseErrorKind> {
    verbose
        .errors
        .into_iter()
        .map(|(msg, kind)| {
            log::error!("{:?}", msg);
            kind
        })
        .collect()
}

impl<'a> From<nom::Err<ParseError<'a>>> for Error {
    #[cfg(not(tarpaulin_include))]
    fn from(pe: nom::Err<ParseError<'a>>) -> Self {
        match pe {
            nom::Err::Error(verbose) | nom::Err::Failure(verbose) => {
                Self::ParseError(handle_nom_verbose_error(verbose))
            }
            nom::Err::Incomplete(_) => unreachable!(),
        }
    }
}

impl From<io::Error> for Error {
    #[cfg(not(tarpaulin_include))]
    fn from(ie: io::Error) -> Self {
        Self::IoError(ie)
    }
}

// Custom debug methods

#[cfg(not(tarpaulin_include))]
#[allow(clippy::ptr_arg)]
pub fn slots_fmt(slots: &Vec<Slot>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "(")?;
    for (position, slot) in slots.iter().enumerate() {
        if position > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}{:?}", slot.edge.0, slot.side)?;
    }
    write!(f, ")")
}

#[cfg(not(tarpaulin_include))]
pub fn opt_fmt<T: fmt::Debug>(option: &Option<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match option {
        Some(val) => val.fmt(f),
        None => write!(f, "_"),
    }
}

// Printing

#[cfg(not(tarpaulin_include))]
pub fn print_rotation_system(graph: &Graph) {
    for vertex in graph.vertices() {
        let neighbours = (0..vertex.degree())
            .filter_map(|slot| graph.opposite(crate::graph::Dart::new(vertex.label, slot)))
            .map(|far| far.vertex.to_string());
        println!(
            "{}: {}",
            vertex.label,
            Itertools::intersperse(neighbours, " ".to_string()).collect::<String>()
        );
    }
}

#[cfg(not(tarpaulin_include))]
pub fn print_faces(graph: &Graph, faces: &[Face]) {
    for (index, face) in faces.iter().enumerate() {
        print!("face {} ({}): ", index, face.len());
        Itertools::intersperse(
            face.edges()
                .map(|edge| graph.position_of(edge).unwrap_or(edge.0).to_string()),
            " ".to_string(),
        )
        .for_each(|part| print!("{}", part));
        println!();
    }
}

#[cfg(not(tarpaulin_include))]
pub fn print_canonical(form: &CanonicalForm) -> Result<(), Error> {
    println!("code: {:?}", form.code);
    println!("vertex order: {:?}", form.vertex_order);
    println!(
        "edge order: {:?}",
        form.edge_order.iter().map(|edge| edge.0).collect_vec()
    );
    io::stdout().flush().map_err(Error::from)
}

// Debug macros that allow to time single expressions

#[macro_export]
macro_rules! time {
    ($i:ident, $ret:ident, $exp:expr) => {
        let before = std::time::Instant::now();
        let $ret = $exp;
        let $i = before.elapsed();
    };
}

#[macro_export]
macro_rules! time_mut {
    ($i:ident, $ret:ident, $exp:expr) => {
        let before = std::time::Instant::now();
        let mut $ret = $exp;
        let $i = before.elapsed();
    };
}

#[macro_export]
macro_rules! parse_single_line {
    ($ret:ident, $exp:expr) => {
        let (res, $ret) = $exp?;
        nom::combinator::eof::<$crate::parser::Input<'_>, $crate::parser::ParseError<'_>>(res)?;
    };
}
