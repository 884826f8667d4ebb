use kmeans_generic::*;

/// A word, clustered by its length.
#[derive(Clone, Debug, PartialEq)]
struct Word(String);

fn main() {
    let words: Vec<Word> = "a an the of on kmeans cluster centroid observation partition lloyd seed"
        .split_whitespace()
        .map(|w| Word(w.to_string()))
        .collect();

    // The representative of a group is its word closest to the average length
    let metric = FnMetric::new(
        |a: &Word, b: &Word| (a.0.len() as f64 - b.0.len() as f64).abs(),
        |members: &[Word]| {
            let avg = members.iter().map(|w| w.0.len() as f64).sum::<f64>() / members.len() as f64;
            members.iter()
                .min_by(|a, b| (a.0.len() as f64 - avg).abs().total_cmp(&(b.0.len() as f64 - avg).abs()))
                .cloned()
                .unwrap_or_else(|| Word(String::new()))
        },
        |a: &Word, b: &Word| a == b,
    );

    let conf = KMeansConfig::build().max_iter(100).build();
    let kmean = KMeans::with_config(&words, metric, conf).unwrap();
    let result = kmean.calculate_from(vec![Word("a".into()), Word("observation".into())]).unwrap();

    println!("Converged: {} after {} iterations", result.converged, result.iterations);
    for cluster in result.clusters.iter() {
        println!("{:?}: {:?}", cluster.centroid, cluster.members);
    }
}
