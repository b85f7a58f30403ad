use serde::Serialize;

/// One output row, in the column order of the public Spotify features dump.
#[derive(Serialize)]
struct Row<'a> {
    genre: &'a str,
    artist_name: String,
    track_name: String,
    track_id: String,
    popularity: u32,
    acousticness: f64,
    danceability: f64,
    duration_ms: u32,
    energy: f64,
    instrumentalness: f64,
    key: &'a str,
    liveness: f64,
    loudness: f64,
    mode: &'a str,
    speechiness: f64,
    tempo: f64,
    time_signature: &'a str,
    valence: f64,
}

/// Genre profile: (name, mean danceability, mean energy, mean acousticness,
/// mean tempo, mean popularity).
type Profile = (&'static str, f64, f64, f64, f64, f64);

const PROFILES: [Profile; 6] = [
    ("Pop", 0.68, 0.66, 0.18, 118.0, 62.0),
    ("Rock", 0.50, 0.78, 0.10, 128.0, 52.0),
    ("Classical", 0.30, 0.15, 0.90, 96.0, 28.0),
    ("Hip-Hop", 0.78, 0.62, 0.16, 104.0, 58.0),
    ("Jazz", 0.55, 0.38, 0.62, 112.0, 36.0),
    ("Electronic", 0.64, 0.82, 0.08, 126.0, 44.0),
];

const KEYS: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const TIME_SIGNATURES: [&str; 4] = ["4/4", "3/4", "5/4", "1/4"];

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn unit(&mut self, mean: f64, std_dev: f64) -> f64 {
        self.gauss(mean, std_dev).clamp(0.0, 1.0)
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "SpotifyFeatures.csv".to_string());

    let mut writer = csv::Writer::from_path(&output_path).expect("Failed to create output file");

    let artists_per_genre = 25;
    let tracks_per_artist = 8;
    let mut rows = 0;

    for (genre, dance, energy, acoustic, tempo, popularity) in PROFILES {
        for a in 0..artists_per_genre {
            let artist = format!("{genre} Artist {a:02}");
            for t in 0..tracks_per_artist {
                // Most time signatures are 4/4.
                let time_signature = if rng.next_f64() < 0.85 {
                    TIME_SIGNATURES[0]
                } else {
                    rng.pick(&TIME_SIGNATURES[1..])
                };
                let row = Row {
                    genre,
                    artist_name: artist.clone(),
                    track_name: format!("Track {} {t}", a * tracks_per_artist + t),
                    track_id: format!("{:016x}", rng.next_u64()),
                    popularity: rng.gauss(popularity, 15.0).clamp(0.0, 100.0) as u32,
                    acousticness: rng.unit(acoustic, 0.15),
                    danceability: rng.unit(dance, 0.12),
                    duration_ms: rng.gauss(225_000.0, 45_000.0).max(30_000.0) as u32,
                    energy: rng.unit(energy, 0.15),
                    instrumentalness: rng.unit(0.1, 0.2),
                    key: rng.pick(&KEYS),
                    liveness: rng.unit(0.2, 0.1),
                    loudness: rng.gauss(-8.0, 3.0).min(0.0),
                    mode: if rng.next_f64() < 0.65 { "Major" } else { "Minor" },
                    speechiness: rng.unit(0.08, 0.06),
                    tempo: rng.gauss(tempo, 18.0).max(40.0),
                    time_signature,
                    valence: rng.unit(0.45, 0.2),
                };
                writer.serialize(&row).expect("Failed to write row");
                rows += 1;
            }
        }
    }

    writer.flush().expect("Failed to flush CSV");

    println!(
        "Wrote {rows} tracks across {} genres to {output_path}",
        PROFILES.len()
    );
}
