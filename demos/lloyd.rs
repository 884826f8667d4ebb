use kmeans_generic::*;

fn main() {
    let (sample_cnt, sample_dims, k) = (20000, 16, 4);

    // Generate some random data
    let samples: Vec<Vec<f64>> = (0..sample_cnt)
        .map(|_| (0..sample_dims).map(|_| rand::random()).collect())
        .collect();

    // Calculate kmeans, using kmean++ as initialization-method
    let kmean = KMeans::new(&samples, EuclideanDistance).unwrap();
    let result = kmean.calculate(k).unwrap();

    println!("Centroids: {:?}", result.centroids().collect::<Vec<_>>());
    println!("Cluster-Assignments: {:?}", result.assignments);
    println!("Error: {}", result.distsum);
}
