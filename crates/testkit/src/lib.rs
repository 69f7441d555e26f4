#![warn(missing_docs)]
//! Shared test surfaces: mesh invariant checks, scene fixtures and
//! newline-delimited JSON logs for docking runs.

mod fixtures;
mod mesh;

use anyhow::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use vrwidgets_core::FrameTick;
use vrwidgets_ui3d::{Mesh, NodeId, UIScene};

pub use fixtures::*;
pub use mesh::*;

/// One line of an event log.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, T: Serialize> {
    /// Frame when the event occurred.
    pub tick: FrameTick,
    /// Kind label.
    pub kind: &'a str,
    /// Event body.
    pub payload: T,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write<T: Serialize>(&mut self, event: &EventRecord<'_, T>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// Mesh metric snapshot for one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeshMetric {
    /// Node name.
    pub name: String,
    /// Widget kind.
    pub kind: &'static str,
    /// Vertex count.
    pub vertices: usize,
    /// Triangle count.
    pub triangles: usize,
    /// Mesh hash (hex string) for deterministic comparisons.
    pub hash: String,
}

impl MeshMetric {
    /// Metric for `mesh` labelled with `name` and `kind`.
    pub fn of(name: impl Into<String>, kind: &'static str, mesh: &Mesh) -> Self {
        Self {
            name: name.into(),
            kind,
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            hash: mesh.hash().to_hex(),
        }
    }
}

/// Metrics of every element that currently has a mesh, in node order.
pub fn collect_mesh_metrics(scene: &UIScene) -> Vec<MeshMetric> {
    scene
        .element_ids()
        .into_iter()
        .filter_map(|id: NodeId| {
            let node = scene.node(id)?;
            let element = node.element()?;
            let mesh = element.mesh()?;
            Some(MeshMetric::of(node.name.clone(), element.kind(), mesh))
        })
        .collect()
}

/// Writes mesh metrics to JSON for CI artifacts.
pub struct MeshMetricSink {
    file: File,
}

impl MeshMetricSink {
    /// Create a sink pointed at the supplied path, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            file: File::create(path)?,
        })
    }

    /// Persist the provided metrics as pretty JSON.
    pub fn write(&mut self, metrics: &[MeshMetric]) -> Result<()> {
        let json = serde_json::to_string_pretty(metrics)?;
        self.file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};
    use vrwidgets_ui3d::geometry::build_box;

    fn temp_path(stem: &str, ext: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "{stem}-{}.{ext}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[test]
    fn mesh_metric_sink_writes_file() {
        let path = temp_path("mesh-metrics", "json");
        let metrics = vec![MeshMetric::of("box", "panel", &build_box(1.0, 1.0))];
        let mut sink = MeshMetricSink::create(&path).expect("sink create");
        sink.write(&metrics).expect("write succeeds");
        let contents = fs::read_to_string(&path).expect("file readable");
        assert!(contents.contains("\"triangles\": 12"));
        assert!(contents.contains(&metrics[0].hash));
    }

    #[test]
    fn jsonl_sink_writes_one_line_per_event() {
        let path = temp_path("events", "jsonl");
        let mut sink = JsonlSink::create(&path).expect("sink create");
        for tick in 0..3 {
            sink.write(&EventRecord {
                tick: FrameTick(tick),
                kind: "probe",
                payload: tick * 2,
            })
            .expect("write succeeds");
        }
        drop(sink);
        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], r#"{"tick":2,"kind":"probe","payload":4}"#);
    }
}
