use std::path::Path;

use csv::{Reader, Writer};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{disc::state::Primitive, error::HydroError, solver::HydroSim};

/// State of a run at one instant: what a snapshot file holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub edges: Array1<f64>,
    pub cells: Array1<Primitive>,
    pub time: f64,
    pub cycle: usize,
}
impl Snapshot {
    pub fn from_sim(sim: &HydroSim<'_>) -> Self {
        Self {
            edges: sim.edges().to_owned(),
            cells: sim.cells().to_owned(),
            time: sim.time(),
            cycle: sim.cycle(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct CellRecord {
    index: usize,
    x_left: f64,
    x_right: f64,
    density: f64,
    velocity: f64,
    pressure: f64,
    entropy: f64,
    time: f64,
    cycle: usize,
}

pub fn write_snapshot<P: AsRef<Path>>(path: P, snapshot: &Snapshot) -> Result<(), HydroError> {
    let mut writer = Writer::from_path(path)?;
    for (index, cell) in snapshot.cells.iter().enumerate() {
        writer.serialize(CellRecord {
            index,
            x_left: snapshot.edges[index],
            x_right: snapshot.edges[index + 1],
            density: cell.density,
            velocity: cell.velocity,
            pressure: cell.pressure,
            entropy: cell.entropy,
            time: snapshot.time,
            cycle: snapshot.cycle,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, HydroError> {
    let path = path.as_ref();
    let mut reader = Reader::from_path(path)?;
    let mut edges = Vec::new();
    let mut cells = Vec::new();
    let (mut time, mut cycle) = (0.0, 0);
    for (i, record) in reader.deserialize::<CellRecord>().enumerate() {
        let record = record?;
        if record.index != i {
            return Err(HydroError::SnapshotFormat {
                path: path.display().to_string(),
                reason: format!("row {i} holds cell {}", record.index),
            });
        }
        if i == 0 {
            edges.push(record.x_left);
        }
        edges.push(record.x_right);
        cells.push(Primitive::new(
            record.density,
            record.pressure,
            record.velocity,
            record.entropy,
        ));
        time = record.time;
        cycle = record.cycle;
    }
    if cells.is_empty() {
        return Err(HydroError::EmptyTable {
            path: path.display().to_string(),
        });
    }
    Ok(Snapshot {
        edges: Array1::from(edges),
        cells: Array1::from(cells),
        time,
        cycle,
    })
}
