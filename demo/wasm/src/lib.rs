// Copyright 2025 Lars Brubaker
// WASM bindings for sweep-cdt

use sweep_cdt::{Context, Coord, Real};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// Collects an outer contour and holes, then triangulates them in one go.
///
/// A context must be sized before points are pushed, so contours are
/// buffered here until `triangulate` is called.
#[wasm_bindgen]
pub struct CdtJs {
    outer: Vec<Coord>,
    holes: Vec<Vec<Coord>>,
    elements: Vec<u32>,
    vertices: Vec<f64>,
    error: Option<String>,
}

fn to_coords(flat: &[f64]) -> Vec<Coord> {
    flat.chunks_exact(2)
        .map(|c| [c[0] as Real, c[1] as Real])
        .collect()
}

#[wasm_bindgen]
impl CdtJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CdtJs {
        CdtJs {
            outer: Vec::new(),
            holes: Vec::new(),
            elements: Vec::new(),
            vertices: Vec::new(),
            error: None,
        }
    }

    /// Set the outer contour from a flat [x0,y0, x1,y1, ...] Float64Array.
    pub fn set_outer(&mut self, vertices: &[f64]) {
        self.outer = to_coords(vertices);
    }

    /// Add a hole contour from a flat [x0,y0, x1,y1, ...] Float64Array.
    pub fn add_hole(&mut self, vertices: &[f64]) {
        self.holes.push(to_coords(vertices));
    }

    /// Triangulate and return true on success. On failure `last_error`
    /// describes what was wrong with the input sequence.
    pub fn triangulate(&mut self) -> bool {
        self.elements.clear();
        self.vertices.clear();
        match self.run() {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.clone()
    }

    /// Number of output triangles.
    pub fn element_count(&self) -> u32 {
        (self.elements.len() / 3) as u32
    }

    pub fn vertex_count(&self) -> u32 {
        (self.vertices.len() / 2) as u32
    }

    /// Flat triangle vertex-index triples [i0,i1,i2, ...] into the input
    /// points, outer contour first, then holes in order.
    pub fn get_elements(&self) -> Vec<u32> {
        self.elements.clone()
    }

    /// Flat vertex positions [x0,y0, x1,y1, ...] of the input points.
    pub fn get_vertices(&self) -> Vec<f64> {
        self.vertices.clone()
    }
}

impl CdtJs {
    fn run(&mut self) -> Result<(), sweep_cdt::CdtError> {
        let total = self.outer.len() + self.holes.iter().map(|h| h.len()).sum::<usize>();
        let mut ctx = Context::new(total as u32)?;
        ctx.push_point_range(&self.outer);
        ctx.add_edge()?;
        for hole in &self.holes {
            ctx.push_point_range(hole);
            ctx.add_hole()?;
        }
        ctx.triangulate()?;
        self.elements = ctx.elements().to_vec();
        self.vertices = ctx.vertices().iter().map(|&v| v as f64).collect();
        Ok(())
    }
}

impl Default for CdtJs {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience: triangulate an outer contour with holes in one call.
///
/// `holes` holds every hole's flat coordinates back to back; `hole_sizes`
/// gives the number of points in each. Returns the element index array, or
/// an empty array if the input could not be triangulated.
#[wasm_bindgen]
pub fn triangulate_polygon(outer: &[f64], holes: &[f64], hole_sizes: &[u32]) -> Vec<u32> {
    let mut t = CdtJs::new();
    t.set_outer(outer);
    let mut start = 0usize;
    for &n in hole_sizes {
        let end = (start + n as usize * 2).min(holes.len());
        t.add_hole(&holes[start..end]);
        start = end;
    }
    if !t.triangulate() {
        return Vec::new();
    }
    t.get_elements()
}
