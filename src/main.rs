use std::env;

use anyhow::{anyhow, Context, Result};
use glam::Vec2;

use solidview::{GestureEvent, Mesh, Rasterizer, Viewer};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;

    let mut viewer = Viewer::new().context("failed to build the default scene")?;
    viewer.set_viewport(options.width, options.height);

    println!("Scene contains {} shapes", viewer.scene().len());
    for shape in viewer.scene().shapes() {
        println!(
            " - {}: {} vertices, {} triangles",
            shape.kind().name(),
            shape.mesh().vertex_count(),
            shape.mesh().triangle_count()
        );
    }

    let queue = viewer.gesture_queue();
    for event in &options.gestures {
        queue.push(*event);
    }

    let mut rasterizer = CountingRasterizer::default();
    for _ in 0..options.frames {
        viewer.drain_gestures();
        viewer.render(&mut rasterizer);
    }
    println!(
        "Rendered {} frame(s) with {} draw call(s)",
        options.frames, rasterizer.draw_calls
    );

    let eye = viewer.camera().eye();
    let center = viewer.camera().center();
    println!(
        "Camera eye=({:.2}, {:.2}, {:.2}) center=({:.2}, {:.2}, {:.2})",
        eye.x, eye.y, eye.z, center.x, center.y, center.z
    );
    Ok(())
}

/// Rasterizer stand-in for headless runs; counts indexed draws.
#[derive(Default)]
struct CountingRasterizer {
    draw_calls: usize,
}

impl Rasterizer for CountingRasterizer {
    fn draw_mesh(&mut self, _mesh: &Mesh) {
        self.draw_calls += 1;
    }
}

struct CliOptions {
    frames: u32,
    width: u32,
    height: u32,
    gestures: Vec<GestureEvent>,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut frames = 1;
        let mut width = 1280;
        let mut height = 720;
        let mut gestures = Vec::new();

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => {
                    let value = args.next().ok_or_else(|| anyhow!("--frames needs a count"))?;
                    frames = value
                        .parse()
                        .with_context(|| format!("invalid frame count {value}"))?;
                }
                "--size" => {
                    let value = args.next().ok_or_else(|| anyhow!("--size needs WxH"))?;
                    (width, height) = parse_size(&value)?;
                }
                "--gesture" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--gesture needs a specification"))?;
                    gestures.push(parse_gesture(&value)?);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --frames, --size or --gesture"
                    ));
                }
            }
        }

        Ok(Self {
            frames,
            width,
            height,
            gestures,
        })
    }
}

fn parse_size(value: &str) -> Result<(u32, u32)> {
    let (width, height) = value
        .split_once('x')
        .ok_or_else(|| anyhow!("--size expects WIDTHxHEIGHT, got {value}"))?;
    Ok((
        width.parse().with_context(|| format!("invalid width {width}"))?,
        height
            .parse()
            .with_context(|| format!("invalid height {height}"))?,
    ))
}

/// Parses a gesture specification: `pan:DX,DY`, `zoom:DD`,
/// `orbit:DX,DY` or `reset`.
fn parse_gesture(spec: &str) -> Result<GestureEvent> {
    let (kind, rest) = spec.split_once(':').unwrap_or((spec, ""));
    let event = match kind {
        "pan" => GestureEvent::Move {
            pointers: 1,
            delta: parse_delta(rest)?,
        },
        "zoom" => GestureEvent::Move {
            pointers: 2,
            delta: Vec2::new(
                0.0,
                rest.parse()
                    .with_context(|| format!("invalid zoom delta {rest}"))?,
            ),
        },
        "orbit" => GestureEvent::Move {
            pointers: 3,
            delta: parse_delta(rest)?,
        },
        "reset" => GestureEvent::Move {
            pointers: 4,
            delta: Vec2::ZERO,
        },
        other => {
            return Err(anyhow!(
                "unknown gesture {other}; expected pan, zoom, orbit or reset"
            ));
        }
    };
    Ok(event)
}

fn parse_delta(rest: &str) -> Result<Vec2> {
    let (dx, dy) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("gesture delta expects DX,DY, got {rest}"))?;
    Ok(Vec2::new(
        dx.parse().with_context(|| format!("invalid delta {dx}"))?,
        dy.parse().with_context(|| format!("invalid delta {dy}"))?,
    ))
}
