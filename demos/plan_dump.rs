//! Wallkit plan dump: prints the outlines of a small joined plan.
//!
//! Usage:
//! ```text
//! cargo run --example plan_dump                       # symmetric arc stepping
//! cargo run --example plan_dump -- --asymmetric       # legacy arc stepping
//! RUST_LOG=wallkit=trace cargo run --example plan_dump
//! ```

use std::f64::consts::FRAC_PI_2;

use wallkit::math::Point2;
use wallkit::{
    ArcStepPolicy, Baseboard, OutlineParams, Result, Wall, WallChange, WallId, WallSide,
    WallStore,
};

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for wallkit.
    // Override with RUST_LOG env var (e.g. RUST_LOG=wallkit=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("wallkit=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let arc_step_policy = if std::env::args().any(|arg| arg == "--asymmetric") {
        ArcStepPolicy::Asymmetric
    } else {
        ArcStepPolicy::Symmetric
    };
    let mut store = WallStore::with_params(OutlineParams {
        arc_step_policy,
        ..OutlineParams::default()
    });
    store.subscribe(|change: &WallChange| {
        tracing::info!(wall = ?change.wall, property = ?change.property, "wall changed");
    });

    // L-shaped room closed by a round wall, counter-clockwise on screen.
    let corners = [
        Point2::new(0.0, 0.0),
        Point2::new(400.0, 0.0),
        Point2::new(400.0, 300.0),
        Point2::new(200.0, 300.0),
        Point2::new(200.0, 500.0),
        Point2::new(0.0, 500.0),
    ];
    let mut ids: Vec<WallId> = Vec::with_capacity(corners.len());
    for (i, start) in corners.iter().enumerate() {
        let end = corners[(i + 1) % corners.len()];
        ids.push(store.add_wall(Wall::new(*start, end, 20.0)?)?);
    }
    for i in 0..ids.len() {
        let next = ids[(i + 1) % ids.len()];
        store.set_wall_at_end(ids[i], Some(next))?;
        store.set_wall_at_start(next, Some(ids[i]))?;
    }
    store.set_arc_extent(ids[2], Some(-FRAC_PI_2))?;
    store.set_baseboard(ids[0], WallSide::Right, Some(Baseboard::new(1.5, 10.0)?))?;

    for &id in &ids {
        let wall = store.wall(id)?;
        println!(
            "{id:?}: ({:.1}, {:.1}) -> ({:.1}, {:.1}) length {:.2}",
            wall.start().x,
            wall.start().y,
            wall.end().x,
            wall.end().y,
            wall.length()
        );
        for include_baseboards in [false, true] {
            let outline = store.outline(id, include_baseboards)?;
            let points: Vec<String> = outline
                .iter()
                .map(|p| format!("({:.3}, {:.3})", p.x, p.y))
                .collect();
            println!(
                "  {} [{}]: {}",
                if include_baseboards { "with baseboards" } else { "plain" },
                outline.len(),
                points.join(" ")
            );
        }
    }
    Ok(())
}
