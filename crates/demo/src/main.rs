// File: crates/demo/src/main.rs
// Summary: Demo loads view models (JSON) or ensemble samples (CSV) and renders every chart kind to PNG and SVG.
// Usage: ensemble-demo <inputs.json|samples.csv> [--config options.json] [--out dir] [--click x,y] [--resize WxH ...]

mod samples;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ensemble_chart_core::axis::{Axis, TickFormat};
use ensemble_chart_core::interaction::{InteractionEvent, PointerEvent};
use ensemble_chart_core::overlay::BarLayout;
use ensemble_chart_core::stats::{RACEBLIND, VRA};
use ensemble_chart_core::svg::render_to_svg;
use ensemble_chart_core::scene::Scene;
use ensemble_chart_core::{
    Chart, ChartInputs, ChartKind, PointF, RenderOptions, ResizeObserver, ResponsiveContainer, SelectionBridge,
    SharedScaleCoordinator, SizeF,
};
use ensemble_chart_skia::SkiaRenderer;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct Args {
    input: PathBuf,
    config: Option<PathBuf>,
    out_dir: PathBuf,
    click: Option<PointF>,
    resize: Vec<SizeF>,
}

impl Args {
    fn parse(mut it: impl Iterator<Item = String>) -> Result<Self> {
        let mut input = None;
        let mut config = None;
        let mut out_dir = PathBuf::from("target/out");
        let mut click = None;
        let mut resize = Vec::new();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--config" => config = Some(PathBuf::from(it.next().context("--config needs a path")?)),
                "--out" => out_dir = PathBuf::from(it.next().context("--out needs a directory")?),
                "--click" => click = Some(parse_point(&it.next().context("--click needs x,y")?)?),
                "--resize" => resize.push(parse_size(&it.next().context("--resize needs WxH")?)?),
                flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
                _ if input.is_none() => input = Some(PathBuf::from(arg.as_str())),
                _ => bail!("unexpected argument {arg}"),
            }
        }
        let input = input.unwrap_or_else(|| PathBuf::from("crates/demo/data/al_samples.csv"));
        Ok(Self { input, config, out_dir, click, resize })
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse(std::env::args().skip(1))?;

    let opts = match &args.config {
        Some(path) => RenderOptions::load(path).with_context(|| format!("loading options '{}'", path.display()))?,
        None => RenderOptions::default(),
    };
    let inputs = load_inputs(&args.input)?;
    let charts = build_charts(&inputs, &opts);

    // clicking the box plot selects a district; every chart highlights it
    let bridge = SelectionBridge::new();
    let mut tooltip = None;
    if let (Some(at), Some((_, box_plot))) = (args.click, charts.iter().find(|(name, _)| *name == "box")) {
        if let Some(mut layer) = box_plot.interaction_layer(&opts) {
            layer.dispatch(PointerEvent::Click(at), &bridge, |_| {});
            if let Some(InteractionEvent::Hovered(hover)) = layer.handle(PointerEvent::Move(at)) {
                tooltip = Some(hover);
            }
        }
        info!(selected = ?bridge.selected(), "click dispatched");
    }
    let selected = bridge.selected();

    let renderer = SkiaRenderer::new();
    let mut written = 0usize;
    for (name, chart) in &charts {
        if chart.is_empty() {
            debug!(chart = *name, "no inputs; skipped");
            continue;
        }
        let mut scene = chart.build_scene(&opts, selected.as_ref());
        if let (true, Some(hover)) = (*name == "box", tooltip.as_ref()) {
            chart.push_tooltip(&mut scene, hover, &opts);
        }
        let out = out_name_with(&args.out_dir, &args.input, name);
        renderer.render_to_png(&scene, &out).with_context(|| format!("rendering {}", out.display()))?;
        let out_svg = out.with_extension("svg");
        render_to_svg(&scene, &out_svg).with_context(|| format!("writing {}", out_svg.display()))?;
        println!("Wrote {}", out.display());
        written += 1;
    }

    // replay host size notifications against the box plot
    if let (false, Some((_, box_plot))) = (args.resize.is_empty(), charts.iter().find(|(name, _)| *name == "box")) {
        for (size, scene) in resized_scenes(box_plot, &opts, &args.resize) {
            let out = out_name_with(&args.out_dir, &args.input, &format!("box_{}x{}", size.width, size.height));
            renderer.render_to_png(&scene, &out).with_context(|| format!("rendering {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
    }
    if written == 0 {
        bail!("no chart had data in '{}'", args.input.display());
    }
    Ok(())
}

fn init_tracing() {
    // RUST_LOG wins over the default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,ensemble_chart_core=warn".into());
    tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();
}

/// JSON view models, or raw ensemble samples when the file is a CSV.
fn load_inputs(path: &Path) -> Result<ChartInputs> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }
    let is_csv = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        let rows = samples::load_samples(path)?;
        Ok(samples::derive_inputs(&rows))
    } else {
        ChartInputs::load(path).with_context(|| format!("failed to load inputs '{}'", path.display()))
    }
}

/// One chart per kind, plus one frequency chart per ensemble sharing a single ceiling.
fn build_charts(inputs: &ChartInputs, opts: &RenderOptions) -> Vec<(&'static str, Chart)> {
    let mut box_legend = vec!["Ensemble mean"];
    if !inputs.references().is_empty() {
        box_legend.push("Enacted plan");
    }
    let density_legend: Vec<String> = inputs.densities.iter().map(|d| d.series_id.to_string()).collect();

    let mut charts = vec![
        ("box", Chart::new(ChartKind::BoxPlot, inputs.clone()).with_legend(box_legend)),
        (
            "density",
            Chart::new(ChartKind::Density, inputs.clone())
                .with_axes(Axis::new("Group population share", TickFormat::Percent), Axis::new("Density", TickFormat::Fixed(1)))
                .with_legend(density_legend),
        ),
        ("trend", Chart::new(ChartKind::Trend, inputs.clone()).with_legend(["Ensemble mean", "District 95% interval"])),
        (
            "splits",
            Chart::new(ChartKind::Frequency(BarLayout::Grouped), inputs.clone()).with_legend(["Race-blind", "VRA-constrained"]),
        ),
    ];

    let siblings: Vec<(&'static str, Chart)> = [("splits_raceblind", RACEBLIND), ("splits_vra", VRA)]
        .into_iter()
        .map(|(name, key)| {
            let frequencies = inputs.frequencies.iter().filter(|f| f.group_key == key).cloned().collect();
            let sub = ChartInputs { frequencies, ..inputs.clone() };
            (name, Chart::new(ChartKind::Frequency(BarLayout::Grouped), sub))
        })
        .collect();
    let mut coordinator = SharedScaleCoordinator::new(opts.shared);
    let datasets: Vec<Vec<f64>> = siblings.iter().map(|(_, c)| c.values()).collect();
    let ceiling = coordinator.shared_max(&datasets);
    info!(ceiling, "seat-split charts share one ceiling");
    for (name, mut chart) in siblings {
        chart.inputs.shared_domain_max = Some(ceiling);
        charts.push((name, chart));
    }
    charts
}

/// Stands in for the host's size observer; the demo has no live window.
struct ReplayObserver;

impl ResizeObserver for ReplayObserver {
    fn unobserve(&mut self) { debug!("resize replay finished"); }
}

/// Rebuild the chart once per size change; repeated sizes are skipped.
fn resized_scenes(chart: &Chart, opts: &RenderOptions, sizes: &[SizeF]) -> Vec<(SizeF, Scene)> {
    let mut container = ResponsiveContainer::new(ReplayObserver, opts.insets);
    let mut out = Vec::new();
    for &size in sizes {
        if !container.on_resize(size) {
            continue;
        }
        let Some(size) = container.size() else { continue };
        out.push((size, chart.build_scene(&opts.with_size(size), None)));
    }
    container.detach();
    out
}

fn parse_size(s: &str) -> Result<SizeF> {
    let (w, h) = s.split_once('x').with_context(|| format!("expected WxH but got '{s}'"))?;
    let w: f32 = w.trim().parse().with_context(|| format!("bad width in '{s}'"))?;
    let h: f32 = h.trim().parse().with_context(|| format!("bad height in '{s}'"))?;
    Ok(SizeF::new(w, h))
}

fn parse_point(s: &str) -> Result<PointF> {
    let (x, y) = s.split_once(',').with_context(|| format!("expected x,y but got '{s}'"))?;
    let x: f32 = x.trim().parse().with_context(|| format!("bad x in '{s}'"))?;
    let y: f32 = y.trim().parse().with_context(|| format!("bad y in '{s}'"))?;
    Ok(PointF::new(x, y))
}

/// Produce output file name like <out>/chart_<stem>_<suffix>.png
fn out_name_with(out_dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    out_dir.join(format!("chart_{stem}_{suffix}.png"))
}
