/// Line classifier for the OBJ-style text format
use nom::{
    character::complete::{char, digit1, multispace0, space0, space1},
    combinator::{all_consuming, map_res, opt, rest},
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::ParseError;
use crate::geometry::Vertex;

/// What a single input line contributes to a mesh
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Empty line or `#` comment
    Blank,
    /// `v x y z`
    Vertex(Vertex),
    /// `f i j k ...`, converted to 0-based indices
    Face(Vec<usize>),
    /// Any other record type
    Ignored,
}

/// Classify one line of input.
///
/// `vertex_count` is the number of vertices parsed before this line; face
/// indices may only refer to those.
pub fn parse_line(line: &str, vertex_count: usize) -> Result<Record, ParseError> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Record::Blank);
    }

    if let Some(body) = line.strip_prefix("v ") {
        parse_vertex(body).map(Record::Vertex)
    } else if let Some(body) = line.strip_prefix("f ") {
        parse_face(body, vertex_count).map(Record::Face)
    } else {
        Ok(Record::Ignored)
    }
}

fn parse_vertex(body: &str) -> Result<Vertex, ParseError> {
    match vertex_coords(body) {
        // `float` also accepts inf, nan and values that overflow f32
        Ok((_, (x, y, z))) if x.is_finite() && y.is_finite() && z.is_finite() => {
            Ok(Vertex::new(x, y, z))
        }
        _ => Err(ParseError::InvalidVertex),
    }
}

fn vertex_coords(input: &str) -> IResult<&str, (f32, f32, f32)> {
    all_consuming(terminated(
        tuple((
            preceded(space0, float),
            preceded(space1, float),
            preceded(space1, float),
        )),
        multispace0,
    ))(input)
}

fn parse_face(body: &str, vertex_count: usize) -> Result<Vec<usize>, ParseError> {
    body.split_whitespace()
        .map(|token| face_index(token, vertex_count))
        .collect()
}

fn face_index(token: &str, vertex_count: usize) -> Result<usize, ParseError> {
    let invalid = || ParseError::InvalidFaceIndex {
        token: token.to_string(),
    };

    let (_, index) = index_token(token).map_err(|_| invalid())?;
    if index == 0 || index > vertex_count {
        return Err(invalid());
    }
    Ok(index - 1)
}

/// `12`, `12/3`, `12//4` and `12/3/4` all yield 12; texture and normal
/// references are dropped.
fn index_token(input: &str) -> IResult<&str, usize> {
    all_consuming(terminated(
        map_res(digit1, str::parse::<usize>),
        opt(preceded(char('/'), rest)),
    ))(input)
}
