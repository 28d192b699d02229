//! Parser for the plain text graph format.
//! A header `n=<vertices>` with an optional colour level ` r=<level>`
//! is followed by one edge per line:
//! `start end [orientation [colour [twist]]]`,
//! where `_` leaves an attribute unset. Lines starting
//! with `#` and blank lines are skipped.

use std::{fmt, sync::Arc};

use crate::{
    colour::{Colour, ColourTable},
    graph::{EdgeSpec, Graph, Orientation, Twist},
    parse_single_line, Error, InputError,
};

pub type Input<'a> = &'a str;
pub type ParseError<'a> = nom::error::VerboseError<Input<'a>>;
pub type ParseResult<'a, O> = nom::IResult<Input<'a>, O, ParseError<'a>>;

type Header = (usize, Option<u32>);

fn parse_header(input: Input<'_>) -> ParseResult<'_, Header> {
    use nom::{
        bytes::complete::tag,
        character::complete::{space0, space1, u32, u64},
        combinator::{map, opt},
        error::context,
        sequence::{preceded, terminated, tuple},
    };

    let vertices = preceded(tag("n="), u64);
    let level = opt(preceded(tuple((space1, tag("r="))), u32));
    let header = context("Graph header", terminated(tuple((vertices, level)), space0));

    map(header, |(num_vert, level)| (num_vert as usize, level))(input)
}

fn parse_comment(input: Input<'_>) -> ParseResult<'_, ()> {
    use nom::{
        character::complete::{char, not_line_ending, space0},
        combinator::value,
        sequence::tuple,
    };

    value((), tuple((space0, char('#'), not_line_ending)))(input)
}

fn parse_orientation(input: Input<'_>) -> ParseResult<'_, Option<Orientation>> {
    use nom::{branch::alt, character::complete::char, combinator::value};

    alt((
        value(Some(Orientation::Forward), char('+')),
        value(Some(Orientation::Backward), char('-')),
        value(None, char('_')),
    ))(input)
}

fn parse_colour(input: Input<'_>) -> ParseResult<'_, Option<Colour>> {
    use nom::{branch::alt, character::complete::char, combinator::map, combinator::value};

    alt((map(nom::character::complete::u32, Some), value(None, char('_'))))(input)
}

fn parse_twist(input: Input<'_>) -> ParseResult<'_, Option<Twist>> {
    use nom::{branch::alt, character::complete::char, combinator::map, combinator::value};

    alt((map(nom::character::complete::i64, Some), value(None, char('_'))))(input)
}

/// Trailing attributes nest, a colour is only read after an orientation
/// and a twist only after a colour.
type Attributes = (Option<Orientation>, Option<Colour>, Option<Twist>);

fn parse_attributes(input: Input<'_>) -> ParseResult<'_, Attributes> {
    use nom::{
        character::complete::space1,
        combinator::{map, opt},
        sequence::{pair, preceded},
    };

    let twist = opt(preceded(space1, parse_twist));
    let colour = opt(preceded(space1, pair(parse_colour, twist)));
    let attributes = opt(preceded(space1, pair(parse_orientation, colour)));

    map(attributes, |attributes| match attributes {
        None => (None, None, None),
        Some((orientation, None)) => (orientation, None, None),
        Some((orientation, Some((colour, twist)))) => (orientation, colour, twist.flatten()),
    })(input)
}

fn parse_edge(input: Input<'_>) -> ParseResult<'_, EdgeSpec> {
    use nom::{
        character::complete::{space0, space1, u64},
        combinator::map,
        error::context,
        sequence::{terminated, tuple},
    };

    let edge = tuple((u64, space1, u64, parse_attributes));
    map(
        context("Edge line", terminated(edge, space0)),
        |(start, _, end, (orientation, colour, twist))| EdgeSpec {
            start: start as usize,
            end: end as usize,
            orientation,
            colour,
            twist,
        },
    )(input)
}

fn is_skipped(line: &str) -> bool {
    line.trim().is_empty() || parse_comment(line).is_ok()
}

/// Parses a whole graph description. All edges are added
/// in file order, so the rotations follow the file as well.
pub fn parse_graph(input: &str) -> Result<Graph, Error> {
    let mut lines = input.lines().filter(|line| !is_skipped(line));

    let header = lines.next().unwrap_or_default();
    parse_single_line!(header, parse_header(header));
    let (num_vert, level) = header;

    let mut graph = match level {
        Some(level) => Graph::with_colour_table(num_vert, Arc::new(ColourTable::new(level)?))?,
        None => Graph::new(num_vert)?,
    };

    let mut specs = Vec::new();
    for line in lines {
        parse_single_line!(spec, parse_edge(line));
        if spec.colour == Some(0) {
            return Err(InputError::Colour(0).into());
        }
        specs.push(spec);
    }
    graph.add_edges(specs)?;

    log::debug!(
        "parsed graph with {} vertices and {} edges",
        graph.num_vert(),
        graph.num_edges()
    );
    Ok(graph)
}

fn write_unset<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: Option<T>) -> fmt::Result {
    match value {
        Some(value) => write!(f, " {}", value),
        None => write!(f, " _"),
    }
}

/// Writes the text format read by `parse_graph`, edges in sequence order.
/// Only the connected state of complete graphs survives a round trip.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.num_vert())?;
        if let Some(table) = self.colour_table() {
            write!(f, " r={}", table.level())?;
        }
        writeln!(f)?;

        for edge in self.edge_list() {
            let data = self.edge_data(edge).map_err(|_| fmt::Error)?;
            write!(f, "{} {}", data.start, data.end)?;

            let given = if data.twist.is_some() {
                3
            } else if data.colour.is_some() {
                2
            } else if data.orientation.is_some() {
                1
            } else {
                0
            };
            if given >= 1 {
                let sign = data.orientation.map(|orientation| match orientation {
                    Orientation::Forward => '+',
                    Orientation::Backward => '-',
                });
                write_unset(f, sign)?;
            }
            if given >= 2 {
                write_unset(f, data.colour)?;
            }
            if given >= 3 {
                write_unset(f, data.twist)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
