//! WKT/EWKT reading.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ParseError, SyntaxError};
use crate::geom::{
    Dimension, Geometry, GeometryCollection, GeometryKind, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon, Position,
};
use crate::io::wkt::lexer::{Lexer, Token, TokenKind};

/// Leading `SRID=<int>;` of an EWKT string.
static SRID_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*SRID\s*=\s*(-?\d+)\s*;").expect("valid SRID regex"));

/// How an unmarked tuple with three ordinates is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThreeOrdinateLayout {
    /// `x y z`
    #[default]
    Xyz,
    /// `x y m`
    Xym,
}

impl From<ThreeOrdinateLayout> for Dimension {
    fn from(layout: ThreeOrdinateLayout) -> Self {
        match layout {
            ThreeOrdinateLayout::Xyz => Dimension::Xyz,
            ThreeOrdinateLayout::Xym => Dimension::Xym,
        }
    }
}

/// A parsed geometry together with its spatial reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Ewkt {
    /// Embedded SRID, else the reader's configured SRID.
    pub srid: Option<i32>,
    pub geometry: Geometry,
}

/// WKT/EWKT reader configuration. Holds no parse state, so one reader can
/// be shared freely; every call to [`WktReader::parse`] is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WktReader {
    srid: Option<i32>,
    three_ordinate_layout: ThreeOrdinateLayout,
}

impl WktReader {
    #[inline] pub fn new() -> Self { Self::default() }

    /// Expected SRID. A different embedded SRID is reported with a warning
    /// and takes precedence.
    #[inline]
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }

    /// Layout assumed for unmarked tuples with three ordinates.
    #[inline]
    pub fn with_three_ordinate_layout(mut self, layout: ThreeOrdinateLayout) -> Self {
        self.three_ordinate_layout = layout;
        self
    }

    #[inline] pub fn srid(&self) -> Option<i32> { self.srid }

    #[inline] pub fn three_ordinate_layout(&self) -> ThreeOrdinateLayout { self.three_ordinate_layout }

    /// Parse one (E)WKT string.
    pub fn parse(&self, input: &str) -> Result<Ewkt, ParseError> {
        let (embedded, body_start) = match SRID_PREFIX.captures(input) {
            Some(captures) => {
                let digits = captures.get(1).map_or("", |m| m.as_str());
                let srid = digits.parse::<i32>().map_err(|_| SyntaxError {
                    token: digits.to_string(),
                    offset: captures.get(1).map_or(0, |m| m.start()),
                    input: input.to_string(),
                })?;
                (Some(srid), captures.get(0).map_or(0, |m| m.end()))
            }
            None => (None, 0),
        };

        if let (Some(configured), Some(embedded)) = (self.srid, embedded) {
            if configured != embedded {
                tracing::warn!(configured, embedded, "[io::wkt::read] embedded SRID differs from configured SRID");
            }
        }

        let mut parser = Parser::new(input, body_start, self.three_ordinate_layout.into())?;
        let geometry = parser.geometry(None)?;
        parser.expect(TokenKind::Eof)?;

        Ok(Ewkt { srid: embedded.or(self.srid), geometry })
    }
}

/// Resolve a keyword, including the fused `<KEYWORD>Z|M|ZM` forms.
fn resolve_keyword(word: &str) -> Option<(GeometryKind, Option<Dimension>)> {
    if let Some(kind) = GeometryKind::from_keyword(word) { return Some((kind, None)) }

    [("ZM", Dimension::Xyzm), ("Z", Dimension::Xyz), ("M", Dimension::Xym)]
        .into_iter()
        .find_map(|(suffix, dim)| {
            word.strip_suffix(suffix).and_then(GeometryKind::from_keyword).map(|kind| (kind, Some(dim)))
        })
}

fn resolve_marker(word: &str) -> Option<Dimension> {
    match word {
        "Z" => Some(Dimension::Xyz),
        "M" => Some(Dimension::Xym),
        "ZM" => Some(Dimension::Xyzm),
        _ => None,
    }
}

/// Recursive-descent parser with one token of lookahead.
struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    lookahead: Token<'a>,
    three_ordinate_layout: Dimension,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, body_start: usize, three_ordinate_layout: Dimension) -> Result<Self, ParseError> {
        let mut lexer = Lexer::with_base(&input[body_start..], body_start);
        let lookahead = lexer.next_token()?;
        Ok(Self { input, lexer, lookahead, three_ordinate_layout })
    }

    fn error(&self) -> ParseError {
        SyntaxError {
            token: self.lookahead.display(),
            offset: self.lookahead.offset,
            input: self.input.to_string(),
        }.into()
    }

    #[inline]
    fn is(&self, kind: TokenKind) -> bool { self.lookahead.kind == kind }

    /// Consume the lookahead token and return it.
    fn advance(&mut self) -> Result<Token<'a>, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.lookahead, next))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.is(kind) { self.advance() } else { Err(self.error()) }
    }

    /// `KEYWORD [Z|M|ZM] (EMPTY | body)`. `inherited` is the explicit
    /// layout of an enclosing collection.
    fn geometry(&mut self, inherited: Option<Dimension>) -> Result<Geometry, ParseError> {
        if !self.is(TokenKind::Text) { return Err(self.error()) }
        let (kind, fused) = resolve_keyword(&self.lookahead.text()).ok_or_else(|| self.error())?;
        self.advance()?;

        let mut explicit = fused;
        if explicit.is_none() && self.is(TokenKind::Text) {
            if let Some(dim) = resolve_marker(&self.lookahead.text()) {
                self.advance()?;
                explicit = Some(dim);
            }
        }
        let mut layout = explicit.or(inherited);

        if self.lookahead.is_word("EMPTY") {
            self.advance()?;
            return Ok(empty(kind, layout.unwrap_or_default()));
        }

        Ok(match kind {
            GeometryKind::Point => {
                self.expect(TokenKind::LeftParen)?;
                let position = self.tuple(&mut layout)?;
                self.expect(TokenKind::RightParen)?;
                Point(position).into()
            }
            GeometryKind::LineString => LineString::new(self.list(|p| p.tuple(&mut layout))?).into(),
            GeometryKind::MultiPoint => MultiPoint::new(self.list(|p| p.multipoint_member(&mut layout))?).into(),
            GeometryKind::Polygon => Polygon::new(self.list(|p| p.list(|p| p.tuple(&mut layout)))?).into(),
            GeometryKind::MultiLineString => {
                MultiLineString::new(self.list(|p| p.list(|p| p.tuple(&mut layout)).map(LineString::new))?).into()
            }
            GeometryKind::MultiPolygon => MultiPolygon::new(
                self.list(|p| p.list(|p| p.list(|p| p.tuple(&mut layout))).map(Polygon::new))?,
            ).into(),
            GeometryKind::GeometryCollection => {
                GeometryCollection::new(self.list(|p| p.geometry(explicit.or(inherited)))?).into()
            }
        })
    }

    /// `( item (, item)* )`
    fn list<T>(&mut self, mut item: impl FnMut(&mut Self) -> Result<T, ParseError>) -> Result<Vec<T>, ParseError> {
        self.expect(TokenKind::LeftParen)?;
        let mut items = vec![item(self)?];
        while self.is(TokenKind::Comma) {
            self.advance()?;
            items.push(item(self)?);
        }
        self.expect(TokenKind::RightParen)?;
        Ok(items)
    }

    /// MultiPoint members may be bare tuples or parenthesized.
    fn multipoint_member(&mut self, layout: &mut Option<Dimension>) -> Result<Position, ParseError> {
        if !self.is(TokenKind::LeftParen) { return self.tuple(layout) }
        self.advance()?;
        let position = self.tuple(layout)?;
        self.expect(TokenKind::RightParen)?;
        Ok(position)
    }

    /// Space-separated ordinates. The first tuple of a geometry without an
    /// explicit marker fixes the layout for every later tuple.
    fn tuple(&mut self, layout: &mut Option<Dimension>) -> Result<Position, ParseError> {
        let max = layout.map_or(4, Dimension::ordinates);
        let mut ordinates = [0.0; 4];
        let mut count = 0;
        while self.is(TokenKind::Number) {
            if count == max { return Err(self.error()) }
            ordinates[count] = self.advance()?.value;
            count += 1;
        }

        let dim = match (*layout, count) {
            (Some(dim), n) if n == dim.ordinates() => dim,
            (None, 2) => Dimension::Xy,
            (None, 3) => self.three_ordinate_layout,
            (None, 4) => Dimension::Xyzm,
            _ => return Err(self.error()),
        };
        *layout = Some(dim);
        Ok(Position::from_ordinates(&ordinates[..count], dim))
    }
}

fn empty(kind: GeometryKind, dimension: Dimension) -> Geometry {
    match kind {
        GeometryKind::Point => Point::empty_with(dimension).into(),
        GeometryKind::LineString => LineString::empty_with(dimension).into(),
        GeometryKind::Polygon => Polygon::empty_with(dimension).into(),
        GeometryKind::MultiPoint => MultiPoint::empty_with(dimension).into(),
        GeometryKind::MultiLineString => MultiLineString::empty_with(dimension).into(),
        GeometryKind::MultiPolygon => MultiPolygon::empty_with(dimension).into(),
        GeometryKind::GeometryCollection => GeometryCollection::empty_with(dimension).into(),
    }
}
