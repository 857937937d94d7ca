//! Command-line layer over the sporepick engine
//!
//! Loads a colour table (built-in Mycomorphbox colours by default), runs the
//! requested derivation, and prints the resulting structures as text or JSON.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use sporepick_algorithms::{
    build_field, fit_corner_projection, fit_plane, project_table, rasterize_plane, Antiprojection,
    BoundsPolicy, CornerFitResult, FieldConfig, PlaneFitConfig,
};
use sporepick_core::{ColourTable, CornerAssignment, Rgb};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sporepick",
    about = "Planar colour layouts for spore print colour pickers",
    version
)]
struct Cli {
    /// JSON colour table to load instead of the built-in Mycomorphbox colours
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Emit results as JSON instead of a text summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit the plane of best fit, project the samples onto it, and rasterize
    /// its background field
    Plane {
        /// Comma-separated sample indices to fit; all samples when omitted
        #[arg(long, value_delimiter = ',')]
        select: Option<Vec<usize>>,

        /// Grid resolution of the background field
        #[arg(long, default_value_t = 40)]
        resolution: usize,
    },
    /// Solve the corner-constrained affine layout
    Layout {
        #[command(flatten)]
        corners: CornerArgs,
    },
    /// Build the triangulated colour field behind the reduced points
    Field {
        #[command(flatten)]
        corners: CornerArgs,

        /// Also sample an antiprojected background gradient at this resolution
        #[arg(long)]
        gradient: Option<usize>,
    },
}

#[derive(Args)]
struct CornerArgs {
    /// Anchor names for corners (0,0), (0,1), (1,0), (1,1)
    #[arg(long, value_delimiter = ',', default_value = "black,green,ochre,white")]
    corners: Vec<String>,

    /// Pin anchors exactly to their corners instead of boxing every point
    #[arg(long)]
    pin_anchors: bool,
}

impl CornerArgs {
    fn assignment(&self) -> Result<CornerAssignment> {
        match self.corners.as_slice() {
            [bl, tl, br, tr] => Ok(CornerAssignment::new(bl, tl, br, tr)),
            other => bail!("expected 4 corner names, got {}", other.len()),
        }
    }

    fn policy(&self) -> BoundsPolicy {
        if self.pin_anchors {
            BoundsPolicy::PinAnchors
        } else {
            BoundsPolicy::BoxAllPoints
        }
    }

    fn solve(&self, table: &ColourTable) -> Result<(CornerAssignment, CornerFitResult)> {
        let assignment = self.assignment()?;
        let fit = fit_corner_projection(table, &assignment, self.policy())?;
        Ok((assignment, fit))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let table = load_table(&cli)?;

    match &cli.command {
        Command::Plane { select, resolution } => {
            let config = PlaneFitConfig {
                selection: select.clone(),
                ..Default::default()
            };
            let fitted = fit_plane(&table, &config)?;
            let field = rasterize_plane(&fitted.plane, *resolution)?;
            let projected = project_table(&fitted.plane, &table);

            if cli.json {
                let samples: Vec<_> = table
                    .iter()
                    .zip(&projected)
                    .map(|(sample, point)| {
                        json!({
                            "name": sample.name,
                            "rgb": sample.rgb.to_hex(),
                            "projected": Rgb::from_vector_clipped(point).to_hex(),
                        })
                    })
                    .collect();
                print_json(&json!({
                    "plane": fitted,
                    "field": field,
                    "projected": samples,
                }))?;
            } else {
                let n = fitted.plane.normal;
                println!(
                    "plane of best fit: normal = [{:.6}, {:.6}, {:.6}], rhs = {:.6}",
                    n.x, n.y, n.z, fitted.plane.rhs
                );
                println!("residual: {:.6}", fitted.residual);
                println!(
                    "background field: {res}x{res} cells, {masked} masked",
                    res = field.resolution(),
                    masked = field.masked_count()
                );
                for (sample, point) in table.iter().zip(&projected) {
                    println!(
                        "  {:<16} {} -> {}",
                        sample.name,
                        sample.rgb.to_hex(),
                        Rgb::from_vector_clipped(point).to_hex()
                    );
                }
            }
        }
        Command::Layout { corners } => {
            let (_, fit) = corners.solve(&table)?;

            if cli.json {
                print_json(&json!(fit))?;
            } else {
                println!("objective: {:.6}", fit.objective);
                println!("projection matrix (rows r, g, b, 1):");
                for row in 0..4 {
                    println!(
                        "  [{:>12.8} {:>12.8}]",
                        fit.projection.matrix[(row, 0)],
                        fit.projection.matrix[(row, 1)]
                    );
                }
                for (sample, point) in table.iter().zip(&fit.points) {
                    println!(
                        "  {:<16} {} -> ({:.4}, {:.4})",
                        sample.name,
                        sample.rgb.to_hex(),
                        point.uv.x,
                        point.uv.y
                    );
                }
            }
        }
        Command::Field { corners, gradient } => {
            let (assignment, fit) = corners.solve(&table)?;
            let field = build_field(&table, &assignment, &fit, &FieldConfig::default())?;
            let gradient_field = (*gradient)
                .map(|resolution| -> Result<_> {
                    let anti = Antiprojection::from_anchors(
                        &fit.anchor_correspondences(&table, &assignment)?,
                    )?;
                    Ok(anti.gradient_field(resolution)?)
                })
                .transpose()?;

            if cli.json {
                print_json(&json!({
                    "field": field,
                    "gradient": gradient_field,
                }))?;
            } else {
                println!(
                    "triangulated field: {} vertices ({} synthetic), {} triangles",
                    field.vertex_count(),
                    field.synthetic_count(),
                    field.triangle_count()
                );
                for (point, colour) in field.points.iter().zip(&field.colours) {
                    let label = point.name.as_deref().unwrap_or("(synthetic)");
                    println!(
                        "  {:<16} {} at ({:.4}, {:.4})",
                        label,
                        colour.to_hex(),
                        point.uv.x,
                        point.uv.y
                    );
                }
                for (idx, triangle) in field.triangles.iter().enumerate() {
                    let [a, b, c] = field.triangle_colours(idx);
                    println!(
                        "  triangle {:>3} [{} {} {}] {} {} {}",
                        idx,
                        triangle[0],
                        triangle[1],
                        triangle[2],
                        a.to_hex(),
                        b.to_hex(),
                        c.to_hex()
                    );
                }
                if let Some(gradient_field) = &gradient_field {
                    println!(
                        "gradient: {res}x{res} cells",
                        res = gradient_field.resolution()
                    );
                }
            }
        }
    }

    Ok(())
}

fn load_table(cli: &Cli) -> Result<ColourTable> {
    match &cli.table {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading colour table {}", path.display()))?;
            let table = serde_json::from_str(&text)
                .with_context(|| format!("parsing colour table {}", path.display()))?;
            Ok(table)
        }
        None => Ok(ColourTable::mycomorphbox()),
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
