use std::fmt;

use serde::{Deserialize, Serialize};

/// Service level selecting which bracket columns apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Plan {
    #[default]
    Basic,
    Premium,
    Advance,
}

impl Plan {
    pub fn all() -> &'static [Plan] {
        &[Plan::Basic, Plan::Premium, Plan::Advance]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Premium => "Premium",
            Self::Advance => "Advance",
        }
    }

    /// Parses the literal plan name. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Basic" => Some(Self::Basic),
            "Premium" => Some(Self::Premium),
            "Advance" => Some(Self::Advance),
            _ => None,
        }
    }

    pub fn details(&self) -> PlanDetails {
        match self {
            Self::Basic => PlanDetails {
                name: "Basic",
                description: "Essential GCC setup with core functionality",
                real_estate: "Managed Workspace",
                it_infra: "Hardware, Networking, Security solutions, Cloud, IT Support, \
                           Collaboration tools, Data-centre, Disaster-recovery backups, \
                           Compliance & audits, End-user peripherals, cybersecurity (SIEM/DLP), \
                           Biometric attendance/access",
                enabling_functions: "Based on team size: HR/Admin, Finance, IT, Admin, HRBP+Ops",
                technology: "Platforms like Talent Trail, Zoho People, Freshteam, Keka Foundation, \
                             BambooHR, SAP SuccessFactors, Recruiter Fusion, Zoho Books",
            },
            Self::Premium => PlanDetails {
                name: "Premium",
                description: "Enhanced GCC setup with additional features",
                real_estate: "Managed Workspace",
                it_infra: "Hardware, Networking, Security solutions, Cloud/SaaS, IT Support & AMC, \
                           Collaboration tools, Data-centre/Colocation, Disaster-recovery backups, \
                           Compliance & audits, End-user peripherals, Advanced cybersecurity \
                           (SIEM/DLP), Biometric attendance/access",
                enabling_functions: "HR/Admin, Finance, IT, Admin, HRBP+Ops, Marketing, Legal, \
                                     Finance, Other",
                technology: "Talent Trail, Zoho Campaigns, Contracts, Books, Premium, \
                             Keka Foundation, BambooHR, Darwinbox, SAP SuccessFactors, \
                             Recruiter Fusion",
            },
            Self::Advance => PlanDetails {
                name: "Advance",
                description: "Comprehensive GCC setup with full customization",
                real_estate: "Managed Workspace",
                it_infra: "Hardware, Networking, Security solutions, Cloud/SaaS, IT Support & AMC, \
                           Collaboration tools, Data-centre/Colocation, Disaster-recovery backups, \
                           Compliance & audits, End-user peripherals, Advanced cybersecurity \
                           (SIEM/DLP), Biometric attendance/access",
                enabling_functions: "HR/Admin, Finance, IT, Admin, HRBP+Ops, Marketing, Legal, \
                                     Finance, Vendor Mgmt, Other",
                technology: "Talent Trial, HubSpot Pro, DocuSign CLM, QuickBooks Adv, \
                             Salesforce Marketing Cloud, Xero, Notion, Marketo Pro, \
                             ContractWorks, NetSuite, Oracle Eloqua, Agifo, SAP B1, Slack Grid, \
                             Keka Foundation, BambooHR, Darwinbox, SAP SuccessFactors, \
                             Recruiter Fusion",
            },
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive text shown next to a result. Has no effect on cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanDetails {
    pub name: &'static str,
    pub description: &'static str,
    pub real_estate: &'static str,
    pub it_infra: &'static str,
    pub enabling_functions: &'static str,
    pub technology: &'static str,
}
