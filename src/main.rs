use aggloclust::clustering::{Config, HierarchicalClustering};
use aggloclust::core::{ClusteringError, ClusteringResult};
use aggloclust::sample::read_sample;
use log::{error, info};
use std::process::ExitCode;

fn run(config_path: &str) -> ClusteringResult<()> {
    let config = Config::from_file(config_path)?;
    config.setup_logging();
    info!("{}", config);

    let data_file = config
        .data_file
        .as_deref()
        .ok_or_else(|| ClusteringError::Config("data_file is not specified".to_string()))?;
    let sample = read_sample(data_file)?;

    let mut clustering = HierarchicalClustering::new(sample.view(), config.to_clustering_params()?)?;
    clustering.process()?;

    let clusters = clustering.get_clusters()?;
    let mut sizes: Vec<usize> = clusters.iter().map(Vec::len).collect();
    sizes.sort_unstable();
    info!(
        "Allocated {} clusters with sizes {:?} ({} engine, {} rounds)",
        clusters.len(),
        sizes,
        clustering.engine_name(),
        clustering.rounds()
    );
    for (idx, (group, center)) in clusters.iter().zip(clustering.get_centers()?).enumerate() {
        println!("cluster {} ({} points) center {}: {:?}", idx, group.len(), center, group);
    }
    Ok(())
}

fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.yaml".to_string());
    match run(&config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
