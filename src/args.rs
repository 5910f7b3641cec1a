use clap::Parser;
use secrecy::SecretString;
use std::{fmt::Display, str::FromStr};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Package registry API URL
    #[clap(long, env, default_value = "https://packages.ecosyste.ms")]
    pub registry_url: String,

    /// Repository activity API URL
    #[clap(long, env, default_value = "https://repos.ecosyste.ms")]
    pub activity_url: String,

    /// API OAuth access token
    #[clap(short, long, env)]
    pub api_token: Option<SecretString>,

    /// Cumulative commit share at which top committers count as maintainers
    #[clap(short, long, env, default_value_t = 0.75, parse(try_from_str=threshold_in_range))]
    pub threshold: f32,

    /// Packages per listing page
    #[clap(long, env, default_value_t = 1000, parse(try_from_str=per_page_in_range))]
    pub per_page: u32,

    /// Maximal parallel repository activity requests
    #[clap(long, env, default_value_t = 10, parse(try_from_str=max_activity_req_in_range))]
    pub max_activity_req: u32,
}

fn threshold_in_range(value: &str) -> clap::Result<f32, String> {
    value
        .parse::<f32>()
        .map_err(|err| format!("{}", err))
        .and_then(|threshold| {
            if threshold <= 0.0 || threshold > 1.0 {
                return Err(format!("Threshold {} is not between (0.0, 1.0].", threshold));
            }
            Ok(threshold)
        })
}

fn per_page_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 1, 1000, "per_page".to_string())
}

fn max_activity_req_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 1, u32::MAX, "max_activity_req".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}
