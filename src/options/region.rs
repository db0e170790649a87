//! AWS region endpoints known to the storage service.

use std::fmt;

/// A region the managed service can be reached in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionEndpoint {
    system_name: &'static str,
    display_name: &'static str,
}

macro_rules! regions {
    ($($konst:ident => ($system:literal, $display:literal)),* $(,)?) => {
        impl RegionEndpoint {
            $(
                pub const $konst: RegionEndpoint = RegionEndpoint {
                    system_name: $system,
                    display_name: $display,
                };
            )*

            /// Every region this crate knows about
            pub const ALL: &'static [RegionEndpoint] = &[$(RegionEndpoint::$konst),*];
        }
    };
}

regions! {
    US_EAST_1 => ("us-east-1", "US East (N. Virginia)"),
    US_EAST_2 => ("us-east-2", "US East (Ohio)"),
    US_WEST_1 => ("us-west-1", "US West (N. California)"),
    US_WEST_2 => ("us-west-2", "US West (Oregon)"),
    AF_SOUTH_1 => ("af-south-1", "Africa (Cape Town)"),
    AP_EAST_1 => ("ap-east-1", "Asia Pacific (Hong Kong)"),
    AP_SOUTH_1 => ("ap-south-1", "Asia Pacific (Mumbai)"),
    AP_NORTHEAST_1 => ("ap-northeast-1", "Asia Pacific (Tokyo)"),
    AP_NORTHEAST_2 => ("ap-northeast-2", "Asia Pacific (Seoul)"),
    AP_NORTHEAST_3 => ("ap-northeast-3", "Asia Pacific (Osaka)"),
    AP_SOUTHEAST_1 => ("ap-southeast-1", "Asia Pacific (Singapore)"),
    AP_SOUTHEAST_2 => ("ap-southeast-2", "Asia Pacific (Sydney)"),
    CA_CENTRAL_1 => ("ca-central-1", "Canada (Central)"),
    CN_NORTH_1 => ("cn-north-1", "China (Beijing)"),
    CN_NORTHWEST_1 => ("cn-northwest-1", "China (Ningxia)"),
    EU_CENTRAL_1 => ("eu-central-1", "Europe (Frankfurt)"),
    EU_NORTH_1 => ("eu-north-1", "Europe (Stockholm)"),
    EU_SOUTH_1 => ("eu-south-1", "Europe (Milan)"),
    EU_WEST_1 => ("eu-west-1", "Europe (Ireland)"),
    EU_WEST_2 => ("eu-west-2", "Europe (London)"),
    EU_WEST_3 => ("eu-west-3", "Europe (Paris)"),
    ME_SOUTH_1 => ("me-south-1", "Middle East (Bahrain)"),
    SA_EAST_1 => ("sa-east-1", "South America (Sao Paulo)"),
    US_GOV_EAST_1 => ("us-gov-east-1", "AWS GovCloud (US-East)"),
    US_GOV_WEST_1 => ("us-gov-west-1", "AWS GovCloud (US-West)"),
}

impl RegionEndpoint {
    /// Look up a region by its system name, e.g. `"eu-west-1"`.
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    pub fn from_system_name(name: &str) -> Option<RegionEndpoint> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|region| region.system_name.eq_ignore_ascii_case(name))
    }

    pub fn system_name(&self) -> &'static str {
        self.system_name
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// HTTPS endpoint of the table service in this region
    pub fn service_endpoint(&self) -> String {
        let domain = if self.system_name.starts_with("cn-") {
            "amazonaws.com.cn"
        } else {
            "amazonaws.com"
        };
        format!("https://dynamodb.{}.{}", self.system_name, domain)
    }
}

impl fmt::Display for RegionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.system_name)
    }
}
