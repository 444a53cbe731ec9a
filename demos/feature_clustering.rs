//! Feature clustering example: DBSCAN, k-means and k-means++ over points
//! and parcels.
//!
//! Run with: RUST_LOG=geocluster=debug cargo run --example feature_clustering

use geo::{polygon, Geometry};
use geocluster::clustering::{
    dbscan, kmeans, kmeans_plus_plus, DbscanClusterer, DbscanConfig, KMeansConfig,
};
use geocluster::core::{CentroidClusterBuilder, CentroidSelector, Cluster, Clusterable, Feature};
use geocluster::distance::{
    AbsoluteDifferenceDistance, CombinedDistance, EuclideanDistance, ExactHausdorffDistance,
};
use geocluster::parameter::Parameter;
use tracing_subscriber::EnvFilter;

fn print_clusters(clusters: &[Cluster<'_, Feature>]) {
    for (i, cluster) in clusters.iter().enumerate() {
        let ids: Vec<&str> = cluster.iter().filter_map(|f| f.id()).collect();
        match cluster.centroid().representative_point() {
            Some(p) => println!(
                "  cluster {}: {} members {:?}, centroid ({:.2}, {:.2})",
                i,
                cluster.len(),
                ids,
                p.x(),
                p.y()
            ),
            None => println!("  cluster {}: {} members {:?}", i, cluster.len(), ids),
        }
    }
}

fn parcel(id: &str, x: f64, y: f64, size: f64) -> Feature {
    Feature::new("Parcel")
        .with_id(id)
        .with_geometry(Geometry::Polygon(polygon![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
            (x: x, y: y),
        ]))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== geocluster Feature Clustering ===\n");

    // 1. Points around three centers, with a population attribute
    let centers = [(0.0, 0.0, 500_i64), (20.0, 5.0, 20_000), (8.0, 30.0, 3_000)];
    let mut towns = Vec::new();
    for (c, &(cx, cy, pop)) in centers.iter().enumerate() {
        for j in 0..6 {
            let angle = j as f64 * std::f64::consts::PI / 3.0;
            towns.push(
                Feature::point("Town", cx + angle.cos() * 1.5, cy + angle.sin() * 1.5)
                    .with_id(format!("t{}{}", c, j))
                    .with_attribute("population", pop + j * 37),
            );
        }
    }
    towns.push(
        Feature::point("Town", 60.0, -40.0)
            .with_id("remote")
            .with_attribute("population", 120_i64),
    );
    println!("Created {} towns", towns.len());

    let builder = CentroidClusterBuilder::new(CentroidSelector::new());

    // 2. DBSCAN by location
    println!("\n--- DBSCAN (eps = 2.0, min_pts = 3) ---");
    let config = DbscanConfig::default().eps(2.0).min_pts(3);
    let result = DbscanClusterer::new(config, EuclideanDistance, &builder, Vec::new())
        .run(&towns)
        .unwrap();
    print_clusters(&result.clusters);
    let noise: Vec<&str> = result
        .noise()
        .into_iter()
        .filter_map(|i| towns[i].id())
        .collect();
    println!("  noise: {:?}", noise);

    // 3. K-means and k-means++ by location
    println!("\n--- K-Means (k = 3) ---");
    let config = KMeansConfig::default().k(3).seed(42);
    match kmeans(&towns, &config, EuclideanDistance, &builder, &[]) {
        Ok(clusters) => print_clusters(&clusters),
        Err(e) => println!("  k-means failed: {}", e),
    }

    println!("\n--- K-Means++ (k = 3) ---");
    match kmeans_plus_plus(&towns, &config, EuclideanDistance, &builder, &[]) {
        Ok(clusters) => print_clusters(&clusters),
        Err(e) => println!("  k-means++ failed: {}", e),
    }

    // 4. DBSCAN on a weighted mix of location and population
    println!("\n--- DBSCAN on 0.5 * distance + 0.01 * |population difference| ---");
    let combined: CombinedDistance<Feature> = CombinedDistance::empty()
        .with(EuclideanDistance, 0.5)
        .with(AbsoluteDifferenceDistance, 0.01);
    let clusters = dbscan(
        &towns,
        &DbscanConfig::default().eps(5.0).min_pts(2),
        &combined,
        &builder,
        &[Parameter::geom(), Parameter::integer("population")],
    )
    .unwrap();
    print_clusters(&clusters);

    // 5. Parcels by Hausdorff distance
    println!("\n--- DBSCAN on parcels with exact Hausdorff distance ---");
    let parcels = vec![
        parcel("p1", 0.0, 0.0, 1.0),
        parcel("p2", 1.2, 0.0, 1.0),
        parcel("p3", 0.0, 1.3, 1.2),
        parcel("p4", 15.0, 15.0, 2.0),
        parcel("p5", 17.5, 15.0, 2.0),
        parcel("p6", 40.0, 0.0, 0.5),
    ];
    let clusters = dbscan(
        &parcels,
        &DbscanConfig::default().eps(3.0).min_pts(1),
        ExactHausdorffDistance::new(),
        &builder,
        &[Parameter::geom()],
    )
    .unwrap();
    print_clusters(&clusters);
    for (i, cluster) in clusters.iter().enumerate() {
        if let Some(union) = cluster.union() {
            println!("  cluster {} union: {:?}", i, geocluster::core::GeometryKind::of(&union));
        }
    }

    println!("\n=== Done ===");
}
