// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! City sets and distance matrices for the tour engine.
//!
//! This module turns coordinate lists or whitespace-delimited text streams
//! into a validated `DistanceMatrix`: symmetric, non-negative, with a zero
//! diagonal. The matrix is the sole input of the tour engine; cities are
//! addressed through `CityIndex`.
//!
//! The loader accepts any `BufRead`, file path, or string slice, making it
//! convenient to feed from benchmarks, tests, and tooling. Lines may
//! contain comments introduced by `#`, which are ignored during
//! tokenization. A seeded random generator produces euclidean instances
//! for benches and demos; the search itself never draws randomness.

use orrery_core::index::{TypedIndex, TypedIndexTag};
use rand::Rng;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// A tag type for city indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CityIndexTag;

impl TypedIndexTag for CityIndexTag {
    const NAME: &'static str = "CityIndex";
}

/// A typed index for cities.
pub type CityIndex = TypedIndex<CityIndexTag>;

/// The error type for distance-matrix construction.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceMatrixError {
    /// The flat distance vector does not have `n * n` entries.
    DimensionMismatch { expected: usize, actual: usize },
    /// A distance is negative or not finite.
    InvalidDistance { from: usize, to: usize, value: f64 },
    /// `d(i, j) != d(j, i)`.
    Asymmetric { from: usize, to: usize },
    /// `d(i, i) != 0`.
    NonZeroDiagonal { city: usize },
}

impl std::fmt::Display for DistanceMatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "distance vector has {} entries but {} were expected",
                actual, expected
            ),
            Self::InvalidDistance { from, to, value } => write!(
                f,
                "distance from city {} to city {} is invalid: {}",
                from, to, value
            ),
            Self::Asymmetric { from, to } => write!(
                f,
                "distance between cities {} and {} differs by direction",
                from, to
            ),
            Self::NonZeroDiagonal { city } => {
                write!(f, "city {} has a non-zero distance to itself", city)
            }
        }
    }
}

impl std::error::Error for DistanceMatrixError {}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "f64").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum InstanceLoadError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended unexpectedly (e.g., missing coordinates).
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// The declared city count is invalid (must be > 0).
    InvalidDimensions,
}

impl std::fmt::Display for InstanceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidDimensions => write!(f, "City count must be a positive integer"),
        }
    }
}

impl std::error::Error for InstanceLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstanceLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// A symmetric city-to-city distance matrix.
///
/// Stored as a flat row-major `Vec<f64>` of `n * n` entries. Construction
/// validates symmetry, a zero diagonal, and non-negative finite entries;
/// after that the engines index it unchecked in their hot loops.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    num_cities: usize,
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Constructs a matrix from a flat row-major distance vector.
    pub fn from_distances(
        num_cities: usize,
        distances: Vec<f64>,
    ) -> Result<Self, DistanceMatrixError> {
        let expected = num_cities * num_cities;
        if distances.len() != expected {
            return Err(DistanceMatrixError::DimensionMismatch {
                expected,
                actual: distances.len(),
            });
        }

        for i in 0..num_cities {
            for j in 0..num_cities {
                let d = distances[i * num_cities + j];
                if !d.is_finite() || d < 0.0 {
                    return Err(DistanceMatrixError::InvalidDistance {
                        from: i,
                        to: j,
                        value: d,
                    });
                }
                if i == j && d != 0.0 {
                    return Err(DistanceMatrixError::NonZeroDiagonal { city: i });
                }
                if distances[j * num_cities + i] != d {
                    return Err(DistanceMatrixError::Asymmetric { from: i, to: j });
                }
            }
        }

        Ok(Self {
            num_cities,
            distances,
        })
    }

    /// Constructs a euclidean matrix from planar city coordinates.
    pub fn from_coordinates(coordinates: &[(f64, f64)]) -> Result<Self, DistanceMatrixError> {
        let n = coordinates.len();
        let mut distances = vec![0.0; n * n];

        for (i, &(xi, yi)) in coordinates.iter().enumerate() {
            for (j, &(xj, yj)) in coordinates.iter().enumerate() {
                distances[i * n + j] = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt();
            }
        }

        Self::from_distances(n, distances)
    }

    /// Generates a random euclidean instance with coordinates drawn
    /// uniformly from `[0, extent)`.
    ///
    /// Only instance *generation* is random; everything the engines do
    /// with the result is deterministic. Pass a seeded RNG for
    /// reproducible instances.
    pub fn random_euclidean<R>(num_cities: usize, extent: f64, rng: &mut R) -> Self
    where
        R: Rng,
    {
        let coordinates: Vec<(f64, f64)> = (0..num_cities)
            .map(|_| (rng.gen::<f64>() * extent, rng.gen::<f64>() * extent))
            .collect();

        // Euclidean coordinates always yield a valid matrix.
        Self::from_coordinates(&coordinates)
            .expect("euclidean coordinates produced an invalid distance matrix")
    }

    /// Loads an instance from a file path.
    ///
    /// See [`DistanceMatrix::load`] for the format.
    pub fn load_from_file<P>(path: P) -> Result<Self, InstanceLoadError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }

    /// Loads an instance from a string slice.
    pub fn load_from_str(input: &str) -> Result<Self, InstanceLoadError> {
        Self::load(BufReader::new(input.as_bytes()))
    }

    /// Loads an instance from any reader.
    ///
    /// Format: whitespace-delimited tokens; the first token is the city
    /// count `n`, followed by `2n` coordinates (`x y` per city). Anything
    /// after `#` on a line is ignored.
    pub fn load<R>(reader: R) -> Result<Self, InstanceLoadError>
    where
        R: Read,
    {
        let mut tokens = Vec::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => &line[..],
            };
            tokens.extend(content.split_whitespace().map(str::to_owned));
        }

        let mut iter = tokens.into_iter();
        let n: usize = parse_token(&mut iter, "usize")?;
        if n == 0 {
            return Err(InstanceLoadError::InvalidDimensions);
        }

        let mut coordinates = Vec::with_capacity(n);
        for _ in 0..n {
            let x: f64 = parse_token(&mut iter, "f64")?;
            let y: f64 = parse_token(&mut iter, "f64")?;
            coordinates.push((x, y));
        }

        // Symmetry and the zero diagonal hold by construction; only
        // non-finite tokens (e.g. "NaN") can still be rejected here.
        DistanceMatrix::from_coordinates(&coordinates).map_err(|_| {
            InstanceLoadError::Parse(ParseTokenError {
                token: "non-finite coordinate".into(),
                type_name: "f64",
            })
        })
    }

    /// Returns the number of cities.
    #[inline(always)]
    pub const fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns the distance between two cities.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds.
    #[inline]
    pub fn distance(&self, from: CityIndex, to: CityIndex) -> f64 {
        debug_assert!(
            from.get() < self.num_cities && to.get() < self.num_cities,
            "called `DistanceMatrix::distance` with city index out of bounds: the len is {} but the indices are {} and {}",
            self.num_cities,
            from.get(),
            to.get()
        );
        self.distances[from.get() * self.num_cities + to.get()]
    }

    /// Computes the total length of a closed tour over the given visiting
    /// order, including the edge back from the last city to the first.
    pub fn tour_length(&self, order: &[CityIndex]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for window in order.windows(2) {
            total += self.distance(window[0], window[1]);
        }
        total += self.distance(order[order.len() - 1], order[0]);
        total
    }
}

impl std::fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DistanceMatrix({} cities)", self.num_cities)
    }
}

fn parse_token<T, I>(iter: &mut I, type_name: &'static str) -> Result<T, InstanceLoadError>
where
    T: std::str::FromStr,
    I: Iterator<Item = String>,
{
    let token = iter.next().ok_or(InstanceLoadError::UnexpectedEof)?;
    token.parse().map_err(|_| {
        InstanceLoadError::Parse(ParseTokenError {
            token,
            type_name,
        })
    })
}
