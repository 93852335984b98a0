use ndarray::{Array1, ArrayView1};
use tracing::debug;

use crate::{
    disc::{
        eos::IdealGas,
        mesh::mesh1d::Mesh1d,
        reconstruction::MinModReconstruction,
        riemann_solver::RiemannSolver,
        state::{Extensive, Primitive},
    },
    error::HydroError,
    source::SourceTerm,
    temporal_disc::compute_time_step,
};

/// Finite-volume integrator of the one-dimensional Euler equations on a fixed mesh.
///
/// The extensive (conserved) state is authoritative; primitives are re-derived from it
/// after every update. A step that fails leaves the simulation exactly as it was.
pub struct HydroSim<'a> {
    mesh: Mesh1d,
    cells: Array1<Primitive>,
    extensives: Array1<Extensive>,
    time: f64,
    cycle: usize,
    cfl: f64,
    interp: &'a MinModReconstruction,
    eos: &'a IdealGas,
    riemann_solver: &'a dyn RiemannSolver,
    source: &'a dyn SourceTerm,
}
impl<'a> HydroSim<'a> {
    pub fn new(
        cfl: f64,
        cells: Array1<Primitive>,
        edges: Array1<f64>,
        interp: &'a MinModReconstruction,
        eos: &'a IdealGas,
        riemann_solver: &'a dyn RiemannSolver,
        source: &'a dyn SourceTerm,
    ) -> Result<Self, HydroError> {
        let mesh = Mesh1d::new(edges)?;
        if cells.len() != mesh.cell_num() {
            return Err(HydroError::CellCountMismatch {
                expected: mesh.cell_num(),
                cells: cells.len(),
            });
        }
        for (i, cell) in cells.iter().enumerate() {
            if !cell.is_physical() {
                return Err(HydroError::UnphysicalState {
                    cell: i,
                    density: cell.density,
                    pressure: cell.pressure,
                    velocity: cell.velocity,
                });
            }
        }
        let cells = cells.mapv(|c| eos.primitive(c.density, c.pressure, c.velocity));
        let extensives = Array1::from_shape_fn(cells.len(), |i| {
            eos.to_extensive(&cells[i], mesh.volumes[i])
        });
        Ok(Self {
            mesh,
            cells,
            extensives,
            time: 0.0,
            cycle: 0,
            cfl,
            interp,
            eos,
            riemann_solver,
            source,
        })
    }
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }
    pub fn time(&self) -> f64 {
        self.time
    }
    pub fn cycle(&self) -> usize {
        self.cycle
    }
    pub fn cells(&self) -> ArrayView1<Primitive> {
        self.cells.view()
    }
    pub fn edges(&self) -> ArrayView1<f64> {
        self.mesh.edges.view()
    }
    pub fn extensives(&self) -> ArrayView1<Extensive> {
        self.extensives.view()
    }
    pub fn mesh(&self) -> &Mesh1d {
        &self.mesh
    }
    /// Total mass, momentum and energy on the grid.
    pub fn total_extensive(&self) -> Extensive {
        self.extensives
            .iter()
            .fold(Extensive::default(), |acc, &e| acc + e)
    }
    /// First-order step: fluxes and force from the current state over a full CFL step.
    pub fn time_advance(&mut self) -> Result<(), HydroError> {
        let dt = self.time_step()?;
        let fluxes = self.compute_fluxes(self.cells.view())?;
        let mut extensives = self.extensives.clone();
        apply_fluxes(fluxes.view(), &mut extensives, dt);
        self.source.calc_force(
            self.mesh.edges.view(),
            self.cells.view(),
            self.time,
            &mut extensives,
            dt,
        )?;
        let cells = self.compute_primitives(&extensives)?;
        self.commit(cells, extensives, dt);
        Ok(())
    }
    /// Midpoint (second order) step.
    ///
    /// A half step from the current state predicts the midpoint state; the full step then
    /// starts again from the current extensives with fluxes and force evaluated at the
    /// midpoint.
    pub fn time_advance2(&mut self) -> Result<(), HydroError> {
        let dt = self.time_step()?;
        let edges = self.mesh.edges.view();

        let fluxes = self.compute_fluxes(self.cells.view())?;
        let mut mid_extensives = self.extensives.clone();
        apply_fluxes(fluxes.view(), &mut mid_extensives, 0.5 * dt);
        self.source.calc_force(
            edges,
            self.cells.view(),
            self.time,
            &mut mid_extensives,
            0.5 * dt,
        )?;
        let mid_cells = self.compute_primitives(&mid_extensives)?;

        let fluxes = self.compute_fluxes(mid_cells.view())?;
        let mut extensives = self.extensives.clone();
        apply_fluxes(fluxes.view(), &mut extensives, dt);
        self.source.calc_force(
            edges,
            mid_cells.view(),
            self.time + 0.5 * dt,
            &mut extensives,
            dt,
        )?;
        let cells = self.compute_primitives(&extensives)?;
        self.commit(cells, extensives, dt);
        Ok(())
    }
    fn time_step(&self) -> Result<f64, HydroError> {
        compute_time_step(self.cells.view(), self.mesh.edges.view(), self.eos, self.cfl)
    }
    /// One flux per interface, the two domain edges included.
    fn compute_fluxes(&self, cells: ArrayView1<Primitive>) -> Result<Array1<Extensive>, HydroError> {
        let interfaces = self.interp.interface_values(cells, self.mesh.edges.view());
        let fluxes = interfaces
            .iter()
            .map(|[left, right]| self.riemann_solver.solve(left, right))
            .collect::<Result<Vec<Extensive>, HydroError>>()?;
        Ok(Array1::from(fluxes))
    }
    fn compute_primitives(&self, extensives: &Array1<Extensive>) -> Result<Array1<Primitive>, HydroError> {
        let mut cells = Array1::from_elem(extensives.len(), Primitive::default());
        for (i, extensive) in extensives.iter().enumerate() {
            let cell = self.eos.to_primitive(extensive, self.mesh.volumes[i]);
            if !(extensive.mass > 0.0) || !cell.is_physical() {
                return Err(HydroError::UnphysicalState {
                    cell: i,
                    density: cell.density,
                    pressure: cell.pressure,
                    velocity: cell.velocity,
                });
            }
            cells[i] = cell;
        }
        Ok(cells)
    }
    fn commit(&mut self, cells: Array1<Primitive>, extensives: Array1<Extensive>, dt: f64) {
        self.cells = cells;
        self.extensives = extensives;
        self.time += dt;
        self.cycle += 1;
        debug!(cycle = self.cycle, time = self.time, dt, "time step done");
    }
}

/// Exchanges `dt * flux` across every interface; boundary fluxes act on one cell only.
fn apply_fluxes(fluxes: ArrayView1<Extensive>, extensives: &mut Array1<Extensive>, dt: f64) {
    let n = extensives.len();
    for (iface, flux) in fluxes.iter().enumerate() {
        let transfer = *flux * dt;
        if iface > 0 {
            extensives[iface - 1] -= transfer;
        }
        if iface < n {
            extensives[iface] += transfer;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        disc::{
            boundary::{ConstantPrimitive, FreeFlow, Periodic, RigidWall, TwoSidedBoundary},
            riemann_solver::exact::ExactRiemannSolver,
        },
        initialization::{polytrope_cells, uniform_edges},
        lane_emden::LaneEmdenTable,
        source::{Gravity, NoSource},
    };
    use approx::assert_relative_eq;

    fn blast_wave(eos: &IdealGas, cell_num: usize) -> (Array1<Primitive>, Array1<f64>) {
        let edges = uniform_edges(cell_num, 1.0);
        let cells = Array1::from_shape_fn(cell_num, |i| {
            let x = 0.5 * (edges[i] + edges[i + 1]);
            if (x - 0.5).abs() < 0.1 {
                eos.primitive(1.0, 10.0, 0.0)
            } else {
                eos.primitive(1.0, 0.1, 0.0)
            }
        });
        (cells, edges)
    }

    #[test]
    fn test_closed_box_conserves_totals() {
        let eos = IdealGas::new(1.4);
        let rs = ExactRiemannSolver::new(1.4);
        let interp = MinModReconstruction::new(Box::new(RigidWall));
        let (cells, edges) = blast_wave(&eos, 100);
        let mut sim = HydroSim::new(0.4, cells, edges, &interp, &eos, &rs, &NoSource).unwrap();
        let initial = sim.total_extensive();
        for _ in 0..200 {
            sim.time_advance2().unwrap();
        }
        let last = sim.total_extensive();
        assert_eq!(sim.cycle(), 200);
        assert_relative_eq!(last.mass, initial.mass, max_relative = 1e-12);
        assert_relative_eq!(last.energy, initial.energy, max_relative = 1e-12);
        assert!(last.momentum.abs() < 1e-9);
        assert!(sim.cells().iter().all(|c| c.is_physical()));
    }

    #[test]
    fn test_first_order_step_matches_flux_difference() {
        let eos = IdealGas::new(1.4);
        let rs = ExactRiemannSolver::new(1.4);
        let interp = MinModReconstruction::new(Box::new(RigidWall));
        let (cells, edges) = blast_wave(&eos, 20);
        let mut sim = HydroSim::new(0.4, cells, edges, &interp, &eos, &rs, &NoSource).unwrap();
        let initial = sim.total_extensive();
        sim.time_advance().unwrap();
        assert_eq!(sim.cycle(), 1);
        assert!(sim.time() > 0.0);
        assert_relative_eq!(sim.total_extensive().mass, initial.mass, max_relative = 1e-14);
        // the blast pushes the gas next to it outwards
        assert!(sim.cells()[7].velocity < 0.0);
        assert!(sim.cells()[12].velocity > 0.0);
    }

    #[test]
    fn test_set_time_only_moves_the_clock() {
        let eos = IdealGas::new(1.4);
        let rs = ExactRiemannSolver::new(1.4);
        let interp = MinModReconstruction::new(Box::new(RigidWall));
        let (cells, edges) = blast_wave(&eos, 10);
        let mut sim = HydroSim::new(0.4, cells.clone(), edges, &interp, &eos, &rs, &NoSource).unwrap();
        sim.set_time(-3.5);
        assert_eq!(sim.time(), -3.5);
        assert_eq!(sim.cycle(), 0);
        assert_eq!(sim.cells()[4].pressure, cells[4].pressure);
        sim.time_advance2().unwrap();
        assert!(sim.time() > -3.5);
        assert_eq!(sim.cycle(), 1);
    }

    #[test]
    fn test_rejects_mismatched_cells() {
        let eos = IdealGas::new(1.4);
        let rs = ExactRiemannSolver::new(1.4);
        let interp = MinModReconstruction::new(Box::new(RigidWall));
        let cells = Array1::from_elem(4, eos.primitive(1.0, 1.0, 0.0));
        assert!(matches!(
            HydroSim::new(0.4, cells, uniform_edges(5, 1.0), &interp, &eos, &rs, &NoSource),
            Err(HydroError::CellCountMismatch { expected: 5, cells: 4 })
        ));
    }

    struct Drain;
    impl SourceTerm for Drain {
        fn calc_force(
            &self,
            _edges: ArrayView1<f64>,
            _cells: ArrayView1<Primitive>,
            _time: f64,
            extensives: &mut Array1<Extensive>,
            _dt: f64,
        ) -> Result<(), HydroError> {
            extensives[2].energy = -1.0;
            Ok(())
        }
    }

    #[test]
    fn test_unphysical_update_is_fatal_and_leaves_state() {
        let eos = IdealGas::new(1.4);
        let rs = ExactRiemannSolver::new(1.4);
        let interp = MinModReconstruction::new(Box::new(RigidWall));
        let (cells, edges) = blast_wave(&eos, 10);
        let mut sim = HydroSim::new(0.4, cells, edges, &interp, &eos, &rs, &Drain).unwrap();
        let before = sim.total_extensive();
        assert!(matches!(
            sim.time_advance2(),
            Err(HydroError::UnphysicalState { cell: 2, .. })
        ));
        assert_eq!(sim.cycle(), 0);
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.total_extensive(), before);
    }

    #[test]
    fn test_star_in_near_vacuum_single_step() {
        let star_gamma = 5.0 / 3.0;
        let n = 1.0 / (star_gamma - 1.0);
        let eos = IdealGas::new(star_gamma);
        let table = LaneEmdenTable::integrate(n, 1e-3).unwrap();
        let edges = uniform_edges(512, 1.01);
        let cells = polytrope_cells(edges.view(), &table, 1.0, 1.0, n, &eos).unwrap();
        let exterior = eos.primitive(1e-25, 1e-26, 0.0);
        let interp = MinModReconstruction::new(Box::new(TwoSidedBoundary::new(
            Box::new(RigidWall),
            Box::new(ConstantPrimitive::new(exterior)),
        )));
        let rs = ExactRiemannSolver::new(star_gamma);
        let gravity = Gravity::new(&table, 1.0, 1.0, edges.view(), false, None).unwrap();
        let mut sim = HydroSim::new(0.2, cells, edges, &interp, &eos, &rs, &gravity).unwrap();
        let initial = sim.total_extensive();
        sim.time_advance2().unwrap();
        assert!(sim.cells().iter().all(|c| c.density > 0.0 && c.pressure > 0.0));
        assert_relative_eq!(sim.total_extensive().mass, initial.mass, max_relative = 1e-8);
        assert_eq!(sim.cycle(), 1);
    }

    #[test]
    fn test_periodic_advection_conserves_totals() {
        let eos = IdealGas::new(1.4);
        let rs = ExactRiemannSolver::new(1.4);
        let interp = MinModReconstruction::new(Box::new(Periodic));
        let cell_num = 60;
        let mut edges: Array1<f64> = Array1::zeros(cell_num + 1);
        for i in 0..cell_num {
            edges[i + 1] = edges[i] + if i % 2 == 0 { 0.01 } else { 0.015 };
        }
        let length = edges[cell_num];
        let cells = Array1::from_shape_fn(cell_num, |i| {
            let x = 0.5 * (edges[i] + edges[i + 1]);
            eos.primitive(1.0 + 0.5 * (2.0 * std::f64::consts::PI * x / length).sin(), 1.0, 1.0)
        });
        let mut sim = HydroSim::new(0.4, cells, edges, &interp, &eos, &rs, &NoSource).unwrap();
        let initial = sim.total_extensive();
        for _ in 0..300 {
            sim.time_advance2().unwrap();
        }
        let last = sim.total_extensive();
        assert_relative_eq!(last.mass, initial.mass, max_relative = 1e-12);
        assert_relative_eq!(last.momentum, initial.momentum, max_relative = 1e-12);
        assert_relative_eq!(last.energy, initial.energy, max_relative = 1e-12);
        assert!(sim.cells().iter().all(|c| c.is_physical()));
    }

    #[test]
    fn test_free_flow_blast_stays_physical() {
        let eos = IdealGas::new(1.4);
        let rs = ExactRiemannSolver::new(1.4);
        let interp = MinModReconstruction::new(Box::new(FreeFlow));
        let (cells, edges) = blast_wave(&eos, 100);
        let mut sim = HydroSim::new(0.4, cells, edges, &interp, &eos, &rs, &NoSource).unwrap();
        let initial = sim.total_extensive();
        // long enough for both shocks to leave the box
        while sim.time() < 1.5 {
            sim.time_advance2().unwrap();
        }
        assert!(sim.cells().iter().all(|c| c.is_physical()));
        let last = sim.total_extensive();
        assert!(last.mass < initial.mass);
        assert!(last.energy < initial.energy);
    }
}
