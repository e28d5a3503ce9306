use clap::{Parser, ValueEnum};
use njtree::sample::{ColorElement, Sample, cluster_samples};
use njtree::{DistanceMatrix, NjError, neighbor_join};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Demo of neighbor-joining clustering
#[derive(Parser)]
#[command(name = "njtree")]
#[command(about = "Cluster demo data by neighbor joining and print the tree")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Which demo data set to cluster
    #[arg(long, value_enum, default_value_t = Demo::Wiki)]
    demo: Demo,

    /// Number of color elements per sample (colors demo)
    #[arg(long, default_value_t = 10)]
    sample_length: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum Demo {
    /// Five taxa with textbook distances
    Wiki,
    /// Four samples of colored elements
    Colors,
}

fn main() -> Result<(), NjError> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let tree = match cli.demo {
        Demo::Wiki => {
            let matrix = wiki_matrix()?;
            println!("{matrix}");
            neighbor_join(matrix)?
        }
        Demo::Colors => cluster_samples(&color_samples(cli.sample_length)?)?,
    };

    tree.print_tree();
    Ok(())
}

fn wiki_matrix() -> Result<DistanceMatrix, NjError> {
    let labels = ["sampleA", "sampleB", "sampleC", "sampleD", "sampleE"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    DistanceMatrix::new(
        labels,
        vec![
            vec![0.0, 5.0, 9.0, 9.0, 8.0],
            vec![5.0, 0.0, 10.0, 10.0, 9.0],
            vec![9.0, 10.0, 0.0, 8.0, 7.0],
            vec![9.0, 10.0, 8.0, 0.0, 3.0],
            vec![8.0, 9.0, 7.0, 3.0, 0.0],
        ],
    )
}

/// Four samples whose elements cycle through a small palette at different
/// strides, so each sample gets its own color mix.
fn color_samples(length: usize) -> Result<Vec<Sample>, NjError> {
    let palette = [
        ColorElement::from_rgb(255, 0, 0)?,     // red
        ColorElement::from_rgb(0, 0, 255)?,     // blue
        ColorElement::from_rgb(255, 255, 255)?, // white
        ColorElement::from_rgb(153, 0, 0)?,     // dark red
        ColorElement::from_rgb(255, 102, 102)?, // light red
    ];
    info!(
        red_blue = palette[0].distance(&palette[1]),
        red_white = palette[0].distance(&palette[2]),
        red_dark_red = palette[0].distance(&palette[3]),
        "palette distances"
    );

    let samples = (1..=4)
        .map(|s| {
            let elements = (0..length).map(|i| palette[(i * s + s) % palette.len()]).collect();
            Sample::with_elements(format!("sp{s}"), elements)
        })
        .collect();
    Ok(samples)
}
