// src/types.rs

/// Element classes reported in a SWMM output file.
///
/// The per-period results block stores classes in this order:
/// subcatchments, then nodes, then links, then the single system record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Subcatchment,
    Node,
    Link,
    System,
}

/// Selector for [`project_size`](crate::OutReader::project_size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCount {
    Subcatchments,
    Nodes,
    Links,
    Pollutants,
}

/// Flow rate unit system codes written by the SWMM engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum FlowUnits {
    Cfs = 0,
    Gpm = 1,
    Mgd = 2,
    Cms = 3,
    Lps = 4,
    Mld = 5,
}

impl FlowUnits {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FlowUnits::Cfs),
            1 => Some(FlowUnits::Gpm),
            2 => Some(FlowUnits::Mgd),
            3 => Some(FlowUnits::Cms),
            4 => Some(FlowUnits::Lps),
            5 => Some(FlowUnits::Mld),
            _ => None,
        }
    }

    /// True for the metric unit systems (CMS, LPS, MLD).
    pub fn is_metric(&self) -> bool {
        matches!(self, FlowUnits::Cms | FlowUnits::Lps | FlowUnits::Mld)
    }
}

/// Per-pollutant concentration unit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ConcUnits {
    MgPerLiter = 0,
    UgPerLiter = 1,
    CountsPerLiter = 2,
}

impl ConcUnits {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ConcUnits::MgPerLiter),
            1 => Some(ConcUnits::UgPerLiter),
            2 => Some(ConcUnits::CountsPerLiter),
            _ => None,
        }
    }
}

/// Reported subcatchment attributes, in file order.
///
/// Pollutant concentrations follow the eight fixed slots, one slot per
/// tracked pollutant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubcatchAttribute {
    /// Rainfall rate (in/hr or mm/hr).
    Rainfall,
    /// Snow depth (in or mm).
    SnowDepth,
    /// Evaporation loss (in/hr or mm/hr).
    EvapLoss,
    /// Infiltration loss (in/hr or mm/hr).
    InfilLoss,
    /// Runoff rate (flow units).
    RunoffRate,
    /// Groundwater outflow rate (flow units).
    GwOutflowRate,
    /// Groundwater table elevation (ft or m).
    GwTableElev,
    /// Unsaturated zone moisture content (fraction).
    SoilMoisture,
    /// Concentration of the given pollutant (slot `8 + i`).
    PollutantConc(usize),
}

impl SubcatchAttribute {
    /// Number of non-pollutant slots.
    pub const FIXED_SLOTS: usize = 8;

    /// Zero-based position within the subcatchment variable block.
    pub fn index(&self) -> usize {
        match self {
            SubcatchAttribute::Rainfall => 0,
            SubcatchAttribute::SnowDepth => 1,
            SubcatchAttribute::EvapLoss => 2,
            SubcatchAttribute::InfilLoss => 3,
            SubcatchAttribute::RunoffRate => 4,
            SubcatchAttribute::GwOutflowRate => 5,
            SubcatchAttribute::GwTableElev => 6,
            SubcatchAttribute::SoilMoisture => 7,
            SubcatchAttribute::PollutantConc(i) => Self::FIXED_SLOTS + i,
        }
    }

    pub(crate) fn pollutant(&self) -> Option<usize> {
        match self {
            SubcatchAttribute::PollutantConc(i) => Some(*i),
            _ => None,
        }
    }
}

/// Reported node attributes, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeAttribute {
    /// Water depth above invert (ft or m).
    InvertDepth,
    /// Hydraulic head (ft or m).
    HydraulicHead,
    /// Stored + ponded volume (ft3 or m3).
    PondedVolume,
    /// Lateral inflow (flow units).
    LateralInflow,
    /// Total (lateral + upstream) inflow (flow units).
    TotalInflow,
    /// Overflow / flooding losses (flow units).
    FloodingLosses,
    /// Concentration of the given pollutant (slot `6 + i`).
    PollutantConc(usize),
}

impl NodeAttribute {
    pub const FIXED_SLOTS: usize = 6;

    /// Zero-based position within the node variable block.
    pub fn index(&self) -> usize {
        match self {
            NodeAttribute::InvertDepth => 0,
            NodeAttribute::HydraulicHead => 1,
            NodeAttribute::PondedVolume => 2,
            NodeAttribute::LateralInflow => 3,
            NodeAttribute::TotalInflow => 4,
            NodeAttribute::FloodingLosses => 5,
            NodeAttribute::PollutantConc(i) => Self::FIXED_SLOTS + i,
        }
    }

    pub(crate) fn pollutant(&self) -> Option<usize> {
        match self {
            NodeAttribute::PollutantConc(i) => Some(*i),
            _ => None,
        }
    }
}

/// Reported link attributes, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkAttribute {
    /// Flow rate (flow units).
    FlowRate,
    /// Flow depth (ft or m).
    FlowDepth,
    /// Flow velocity (ft/s or m/s).
    FlowVelocity,
    /// Flow volume (ft3 or m3).
    FlowVolume,
    /// Fraction of conduit filled.
    Capacity,
    /// Concentration of the given pollutant (slot `5 + i`).
    PollutantConc(usize),
}

impl LinkAttribute {
    pub const FIXED_SLOTS: usize = 5;

    /// Zero-based position within the link variable block.
    pub fn index(&self) -> usize {
        match self {
            LinkAttribute::FlowRate => 0,
            LinkAttribute::FlowDepth => 1,
            LinkAttribute::FlowVelocity => 2,
            LinkAttribute::FlowVolume => 3,
            LinkAttribute::Capacity => 4,
            LinkAttribute::PollutantConc(i) => Self::FIXED_SLOTS + i,
        }
    }

    pub(crate) fn pollutant(&self) -> Option<usize> {
        match self {
            LinkAttribute::PollutantConc(i) => Some(*i),
            _ => None,
        }
    }
}

/// Reported system-wide attributes, in file order.
///
/// The system record has a fixed 14-slot layout with no pollutant slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum SystemAttribute {
    /// Air temperature (deg F or deg C).
    AirTemp = 0,
    /// Rainfall rate (in/hr or mm/hr).
    Rainfall = 1,
    /// Snow depth (in or mm).
    SnowDepth = 2,
    /// Evaporation + infiltration loss (in/hr or mm/hr).
    EvapInfilLoss = 3,
    /// Runoff flow (flow units).
    RunoffFlow = 4,
    /// Dry weather inflow (flow units).
    DryWeatherInflow = 5,
    /// Groundwater inflow (flow units).
    GroundwaterInflow = 6,
    /// Rainfall-derived infiltration/inflow (flow units).
    RdiiInflow = 7,
    /// User-defined direct inflow (flow units).
    DirectInflow = 8,
    /// Total lateral inflow (flow units).
    TotalLateralInflow = 9,
    /// Flood losses (flow units).
    FloodLosses = 10,
    /// Outfall flow (flow units).
    OutfallFlow = 11,
    /// Stored volume (ft3 or m3).
    StoredVolume = 12,
    /// Evaporation rate (in/day or mm/day).
    EvapRate = 13,
}

impl SystemAttribute {
    pub const SLOTS: usize = 14;

    /// Zero-based position within the system variable block.
    pub fn index(&self) -> usize {
        *self as usize
    }
}
