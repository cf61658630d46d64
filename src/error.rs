// Copyright 2025 Lars Brubaker
// License: MIT
//
// Recoverable misuse of the context lifecycle. Capacity overruns and broken
// mesh topology are not represented here; those panic.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CdtError {
    #[error("context capacity must be at least one point")]
    ZeroCapacity,
    #[error("a contour needs at least 3 points, got {0}")]
    ContourTooShort(usize),
    #[error("the outer contour has already been added")]
    OuterContourAlreadyAdded,
    #[error("holes must be added after the outer contour")]
    HoleBeforeOuterContour,
    #[error("no outer contour has been added")]
    MissingOuterContour,
    #[error("{0} pushed points are not closed into a contour")]
    UnclosedContour(usize),
    #[error("context has already been triangulated")]
    AlreadyTriangulated,
}

pub type CdtResult<T> = Result<T, CdtError>;
