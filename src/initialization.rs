use ndarray::{Array1, ArrayView1};
use tracing::info;

use crate::{
    disc::{
        boundary::TwoSidedBoundary, eos::IdealGas, reconstruction::MinModReconstruction,
        riemann_solver::RiemannSolver, state::Primitive,
    },
    error::HydroError,
    io::param_parser::SimulationParamParser,
    lane_emden::{LaneEmdenTable, linear_interpolation},
    source::{Gravity, ParabolicOrbit},
};

/// Resolution of the built-in Lane-Emden integration when no tables are given.
const LANE_EMDEN_STEP: f64 = 1e-4;

/// `cell_num + 1` equally spaced edges on `[0, length]`.
pub fn uniform_edges(cell_num: usize, length: f64) -> Array1<f64> {
    let dx = length / cell_num as f64;
    Array1::from_shape_fn(cell_num + 1, |i| i as f64 * dx)
}

/// Hydrostatic polytrope of index `n` sampled at the cell centres.
///
/// Cells beyond the stellar surface get a tenuous, cold atmosphere with
/// `theta = 0.1 theta(xi_1 - dxi)` and `p = 0.1 rho`.
pub fn polytrope_cells(
    edges: ArrayView1<f64>,
    table: &LaneEmdenTable,
    star_mass: f64,
    star_radius: f64,
    n: f64,
    eos: &IdealGas,
) -> Result<Array1<Primitive>, HydroError> {
    let central_density = table.central_density(star_mass, star_radius);
    let polytropic_constant = table.polytropic_constant(star_mass, star_radius, n);
    let (xi_surface, _) = table.surface();
    let atmosphere_theta = 0.1 * table.theta[table.theta.len() - 2];
    let cell_num = edges.len() - 1;
    let mut cells = Array1::from_elem(cell_num, Primitive::default());
    for i in 0..cell_num {
        let xi = 0.5 * xi_surface * (edges[i + 1] + edges[i]) / star_radius;
        cells[i] = if xi > xi_surface {
            let density = central_density * atmosphere_theta.powf(n);
            eos.primitive(density, 0.1 * density, 0.0)
        } else {
            let theta = linear_interpolation(&table.xi, &table.theta, xi)?;
            let density = central_density * theta.powf(n);
            eos.primitive(density, polytropic_constant * density.powf((n + 1.0) / n), 0.0)
        };
    }
    Ok(cells)
}

/// Star and encounter parameters derived from the run configuration.
#[derive(Clone, Copy, Debug)]
pub struct Encounter {
    pub tidal_radius: f64,
    pub orbit: ParabolicOrbit,
    /// Polytropic index of the star.
    pub index: f64,
    pub start_anomaly: f64,
    pub start_time: f64,
}
impl Encounter {
    pub fn new(params: &SimulationParamParser) -> Self {
        let tidal_radius =
            params.star_radius * (params.black_hole_mass / params.star_mass).powf(1.0 / 3.0);
        let orbit = ParabolicOrbit::new(tidal_radius / params.beta, params.black_hole_mass);
        let start_anomaly = -(2.0 / params.beta - 1.0).acos();
        Self {
            tidal_radius,
            orbit,
            index: 1.0 / (params.star_gamma - 1.0),
            start_anomaly,
            start_time: orbit.time_from_anomaly(start_anomaly),
        }
    }
}

/// Everything the integrator borrows, built once from the configuration.
pub struct Setup {
    pub encounter: Encounter,
    pub eos: IdealGas,
    pub interp: MinModReconstruction,
    pub riemann_solver: Box<dyn RiemannSolver>,
    pub gravity: Gravity,
    pub edges: Array1<f64>,
    pub cells: Array1<Primitive>,
}

pub fn initialize_lane_emden(params: &SimulationParamParser, index: f64) -> Result<LaneEmdenTable, HydroError> {
    match &params.lane_emden_dir {
        Some(dir) => LaneEmdenTable::from_dir(dir, params.star_gamma),
        None => LaneEmdenTable::integrate(index, LANE_EMDEN_STEP),
    }
}

pub fn initialize_setup(params: &SimulationParamParser) -> Result<Setup, HydroError> {
    params.validate()?;
    let encounter = Encounter::new(params);
    info!(
        tidal_radius = encounter.tidal_radius,
        pericenter = encounter.orbit.pericenter,
        index = encounter.index,
        start_anomaly = encounter.start_anomaly,
        start_time = encounter.start_time,
        "encounter"
    );
    let table = initialize_lane_emden(params, encounter.index)?;
    let eos = IdealGas::new(params.gas_gamma);
    let interp = MinModReconstruction::new(Box::new(TwoSidedBoundary::new(
        params.left_boundary.build(&eos),
        params.right_boundary.build(&eos),
    )));
    let riemann_solver = params.riemann_solver.build(params.gas_gamma);
    let edges = uniform_edges(params.cell_num, params.star_radius * params.domain_factor);
    let cells = polytrope_cells(
        edges.view(),
        &table,
        params.star_mass,
        params.star_radius,
        encounter.index,
        &eos,
    )?;
    let orbit = params.external_gravity.then_some(encounter.orbit);
    let gravity = Gravity::new(
        &table,
        params.star_mass,
        params.star_radius,
        edges.view(),
        params.self_gravity,
        orbit,
    )?;
    info!(
        cells = params.cell_num,
        central_density = cells[0].density,
        xi_surface = table.surface().0,
        "initial star"
    );
    Ok(Setup {
        encounter,
        eos,
        interp,
        riemann_solver,
        gravity,
        edges,
        cells,
    })
}
