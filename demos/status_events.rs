use kmeans_generic::*;

fn main() {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 16, 4, 2500);

    // Generate some random data
    let samples: Vec<Vec<f64>> = (0..sample_cnt)
        .map(|_| (0..sample_dims).map(|_| rand::random()).collect())
        .collect();

    let init_done = |_: &[Cluster<Vec<f64>>]| println!("Initialization completed.");
    let iteration_done = |clusters: &[Cluster<Vec<f64>>], nr: usize, changed: usize| {
        let sizes: Vec<usize> = clusters.iter().map(|c| c.members.len()).collect();
        println!("Iteration {} - Changed centroids: {} | Cluster sizes: {:?}", nr, changed, sizes);
    };
    let conf = KMeansConfig::build()
        .init_done(&init_done)
        .iteration_done(&iteration_done)
        .max_iter(max_iter)
        .build();

    // Calculate kmeans, using kmean++ as initialization-method
    let kmean = KMeans::with_config(&samples, EuclideanDistance, conf).unwrap();
    let result = kmean.calculate_par(k).unwrap();

    println!("Converged: {} after {} iterations", result.converged, result.iterations);
    println!("Error: {}", result.distsum);
}
