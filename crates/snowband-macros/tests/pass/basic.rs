use snowband_macros::Fluxes;

#[derive(Debug, Clone, Copy, Fluxes)]
pub struct BandFluxes {
    pub pliq: f64,
    pub psol: f64,
    pub melt: f64,
}

fn main() {
    let f = BandFluxes { pliq: 1.0, psol: 2.0, melt: 0.5 };
    let mut ts = BandFluxesTimeseries::with_capacity(4);
    assert!(ts.is_empty());
    ts.push(&f);
    ts.push(&f);
    assert_eq!(ts.len(), 2);
    assert_eq!(ts.column("psol"), Some(&[2.0, 2.0][..]));
    assert_eq!(ts.column("runoff"), None);
    assert_eq!(BandFluxes::field_names(), &["pliq", "psol", "melt"]);
}
