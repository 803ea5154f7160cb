use snowband_macros::Fluxes;

#[derive(Debug, Clone, Copy, Fluxes)]
#[fluxes(timeseries_name = "MeltSeries")]
pub struct MeltFluxes {
    pub melt: f64,
    pub snow_pack: f64,
}

fn main() {
    let f = MeltFluxes { melt: 1.5, snow_pack: 50.0 };
    let mut ts = MeltSeries::default();
    ts.push(&f);
    assert_eq!(ts.len(), 1);
    assert_eq!(ts.snow_pack, vec![50.0]);
    assert_eq!(MeltFluxes::field_names(), &["melt", "snow_pack"]);
}
