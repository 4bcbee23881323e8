//! Writes `sample_songs.csv`: a synthetic playlist export with the columns
//! the dashboard expects, a few extra audio features, and some gaps.

use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// One CSV row. `None` fields are written as empty cells.
#[derive(Serialize)]
struct SongRow {
    track_id: String,
    track_name: String,
    track_artist: String,
    track_popularity: Option<u32>,
    playlist_genre: Option<&'static str>,
    danceability: f64,
    energy: Option<f64>,
    loudness: f64,
    tempo: f64,
    duration_ms: u32,
}

// (genre, popularity mean, energy mean, tempo mean)
const GENRES: [(&str, f64, f64, f64); 6] = [
    ("pop", 62.0, 0.70, 118.0),
    ("rap", 55.0, 0.65, 105.0),
    ("rock", 48.0, 0.78, 125.0),
    ("latin", 58.0, 0.72, 110.0),
    ("r&b", 50.0, 0.58, 100.0),
    ("edm", 45.0, 0.85, 126.0),
];

const WORDS: [&str; 12] = [
    "Night", "Fire", "Dream", "Gold", "Heart", "City", "Echo", "Wild", "Blue", "Summer", "Ghost",
    "River",
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let artists: Vec<String> = (0..60)
        .map(|i| format!("{} {}", rng.pick(&WORDS), ["Band", "Kid", "Collective", "Lights"][i % 4]))
        .collect();

    let output_path = "sample_songs.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let rows = 2000;
    for i in 0..rows {
        let &(genre, pop_mean, energy_mean, tempo_mean) = rng.pick(&GENRES);
        let energy = rng.gauss(energy_mean, 0.12).clamp(0.0, 1.0);
        let popularity = rng.gauss(pop_mean, 18.0).clamp(0.0, 100.0).round() as u32;

        let row = SongRow {
            track_id: format!("trk{i:05}"),
            track_name: format!("{} {}", rng.pick(&WORDS), rng.pick(&WORDS)),
            track_artist: rng.pick(&artists).clone(),
            track_popularity: (!rng.chance(0.01)).then_some(popularity),
            playlist_genre: (!rng.chance(0.02)).then_some(genre),
            danceability: (0.4 + 0.5 * energy + rng.gauss(0.0, 0.1)).clamp(0.0, 1.0),
            energy: (!rng.chance(0.01)).then_some(energy),
            loudness: -14.0 + 10.0 * energy + rng.gauss(0.0, 1.5),
            tempo: rng.gauss(tempo_mean, 12.0).max(40.0),
            duration_ms: rng.gauss(210_000.0, 35_000.0).max(60_000.0) as u32,
        };
        writer.serialize(row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush writer");

    println!("Wrote {rows} songs to {output_path}");
}
