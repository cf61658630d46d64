// sweep-cdt: sweep-line constrained Delaunay triangulation of polygons with holes
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod arena;
pub mod cdt;
pub mod error;
pub mod front;
pub mod geom;
pub mod mesh;
pub mod sweep;

pub use arena::{size_required, Capacity};
pub use cdt::Context;
pub use error::{CdtError, CdtResult};
pub use geom::{Coord, Real, EPSILON};
pub use mesh::{EdgeIdx, Mesh, Point, PointIdx, TriFlags, TriIdx, Triangle, INVALID};
