//! Deterministic in-memory catalog for running without cloud credentials.

use scheme_core::Scheme;
use tracing::debug;

use crate::error::CatalogError;
use crate::SchemeSearch;

/// Sample catalog returning a fixed list per category.
///
/// The query text is ignored; results are always in catalog order, truncated
/// to `top_k`. Categories without sample data yield an empty list.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog;

impl MockCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl SchemeSearch for MockCatalog {
    fn search(
        &self,
        category_id: &str,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<Scheme>, CatalogError> {
        debug!(category = %category_id, query = %query, top_k, "Mock search");
        let mut schemes = match category_id {
            "FARMER" => farmer_schemes(),
            "MSME" => msme_schemes(),
            _ => Vec::new(),
        };
        schemes.truncate(top_k);
        Ok(schemes)
    }
}

fn scheme(
    id: &str,
    name: &str,
    description: &str,
    eligibility: &str,
    benefits: &str,
    process: &str,
    url: &str,
) -> Scheme {
    Scheme::new(id, name, description, eligibility, benefits)
        .with_application_process(process)
        .with_url(url)
}

/// Sample farmer-support schemes.
pub fn farmer_schemes() -> Vec<Scheme> {
    vec![
        scheme(
            "farmer-1",
            "PM-KISAN Scheme",
            "Direct income support of ₹6000 per year to farmer families owning cultivable land",
            "All landholding farmer families across the country",
            "Financial benefit of ₹6000 per year in three equal installments of ₹2000 each",
            "Register online at pmkisan.gov.in portal or visit nearest Common Service Center",
            "https://pmkisan.gov.in",
        ),
        scheme(
            "farmer-2",
            "Kisan Credit Card (KCC)",
            "Credit facility for farmers to meet short term credit requirements for cultivation and other needs",
            "Farmers - individual/joint borrowers who are owner cultivators, tenant farmers, oral lessees, and sharecroppers",
            "Flexible credit limit, minimal documentation, low interest rates (4% per annum), insurance coverage",
            "Apply through any commercial bank, RRB, cooperative bank with land ownership documents",
            "https://pmkisan.gov.in/Rpo_FarmerCreditCard.aspx",
        ),
        scheme(
            "farmer-3",
            "Pradhan Mantri Fasal Bima Yojana (PMFBY)",
            "Comprehensive crop insurance scheme providing financial support to farmers in case of crop loss",
            "All farmers including sharecroppers and tenant farmers growing notified crops",
            "Coverage for natural calamities, pests, and diseases. Premium: 2% for Kharif, 1.5% for Rabi crops",
            "Apply within stipulated time through banks, insurance companies or online portal",
            "https://pmfby.gov.in",
        ),
        scheme(
            "farmer-4",
            "PM Kisan Samman Nidhi Yojana",
            "Income support scheme for small and marginal farmers",
            "Small and marginal farmer families having combined land holding up to 2 hectares",
            "₹6000 per year paid in three equal installments directly to bank accounts",
            "Self-registration on PM-KISAN portal or through local revenue officer",
            "https://pmkisan.gov.in",
        ),
        scheme(
            "farmer-5",
            "Soil Health Card Scheme",
            "Provides information on nutrient status of soil along with recommendations on dosage of nutrients",
            "All farmers across the country",
            "Free soil testing, customized fertilizer recommendations, improved crop yield",
            "Contact local agriculture department or soil testing laboratory",
            "https://soilhealth.dac.gov.in",
        ),
        scheme(
            "farmer-6",
            "Pradhan Mantri Krishi Sinchai Yojana",
            "Irrigation scheme to expand cultivable area with assured irrigation",
            "All farmers engaged in agriculture",
            "Financial assistance for drip/sprinkler irrigation, farm ponds, and other water conservation methods",
            "Apply through state agriculture department",
            "https://pmksy.gov.in",
        ),
        scheme(
            "farmer-7",
            "National Agriculture Market (e-NAM)",
            "Online trading platform for agricultural commodities",
            "All farmers and traders",
            "Better price realization, reduced transaction costs, increased transparency",
            "Register on e-NAM portal with required documents",
            "https://enam.gov.in",
        ),
        scheme(
            "farmer-8",
            "Kisan Call Centre",
            "Telephone helpline for farmers to answer queries related to agriculture",
            "All farmers",
            "Free advisory services in local languages on crop cultivation, pest management, prices",
            "Call toll-free number 1800-180-1551",
            "https://mkisan.gov.in",
        ),
        scheme(
            "farmer-9",
            "Paramparagat Krishi Vikas Yojana",
            "Organic farming support scheme",
            "Farmers interested in organic farming",
            "Financial assistance of ₹50,000 per hectare over 3 years, certification support",
            "Apply through state agriculture department",
            "https://pgsindia-ncof.gov.in",
        ),
        scheme(
            "farmer-10",
            "Rashtriya Krishi Vikas Yojana",
            "State plan scheme for holistic development of agriculture",
            "State governments for benefiting farmers",
            "Infrastructure development, value addition, market support",
            "Implemented through state agriculture departments",
            "https://rkvy.nic.in",
        ),
    ]
}

/// Sample MSME / business-support schemes.
pub fn msme_schemes() -> Vec<Scheme> {
    vec![
        scheme(
            "msme-1",
            "Credit Guarantee Fund Trust for Micro and Small Enterprises (CGTMSE)",
            "Collateral-free credit facility for micro and small enterprises",
            "New and existing micro and small enterprises in manufacturing and service sector",
            "Loans up to ₹2 crore without collateral or third-party guarantee, reduced interest rates",
            "Apply through CGTMSE member lending institutions (banks, NBFCs)",
            "https://www.cgtmse.in",
        ),
        scheme(
            "msme-2",
            "MUDRA Loan Scheme",
            "Funding scheme for non-corporate, non-farm small/micro enterprises under three categories",
            "Non-corporate, non-farm income generating activities up to ₹10 lakh",
            "Shishu (up to ₹50k), Kishore (₹50k-₹5L), Tarun (₹5L-₹10L) loans at competitive rates",
            "Apply online or through any bank, NBFC, or MFI",
            "https://www.mudra.org.in",
        ),
        scheme(
            "msme-3",
            "Prime Minister's Employment Generation Programme (PMEGP)",
            "Credit-linked subsidy scheme for setting up micro-enterprises",
            "Any individual above 18 years. Special category beneficiaries get higher subsidy",
            "Subsidy: 15-35% for manufacturing, 15-25% for service sector. Max subsidy ₹25 lakh",
            "Apply online at KVIC portal or through District Industries Centre",
            "https://www.kviconline.gov.in/pmegp",
        ),
        scheme(
            "msme-4",
            "Credit Linked Capital Subsidy Scheme (CLCSS)",
            "Technology upgradation scheme for MSMEs",
            "Small Scale Industries (SSI) for technology upgradation",
            "15% capital subsidy (maximum ₹15 lakh) on institutional finance of up to ₹1 crore",
            "Apply through banks approved under the scheme",
            "https://dcmsme.gov.in",
        ),
        scheme(
            "msme-5",
            "Stand-Up India Scheme",
            "Facilitating bank loans for SC/ST and women entrepreneurs",
            "SC/ST and/or Women entrepreneurs setting up greenfield enterprise",
            "Loans between ₹10 lakh to ₹1 crore for non-farm sector activities",
            "Apply through any scheduled commercial bank branch",
            "https://www.standupmitra.in",
        ),
        scheme(
            "msme-6",
            "Udyam Registration (formerly Udyog Aadhaar)",
            "Online registration portal for MSMEs",
            "All micro, small, and medium enterprises",
            "Free registration, access to various government schemes, priority sector lending status",
            "Self-declaration based online registration with Aadhaar and PAN",
            "https://udyamregistration.gov.in",
        ),
        scheme(
            "msme-7",
            "Market Development Assistance (MDA) Scheme",
            "Financial assistance for participation in trade fairs and exhibitions",
            "MSMEs and their associations/consortia",
            "75% of space rental and airfare subsidy for international fairs",
            "Apply through Office of Development Commissioner (MSME)",
            "https://dcmsme.gov.in",
        ),
        scheme(
            "msme-8",
            "Micro & Small Enterprises Cluster Development Programme (MSE-CDP)",
            "Support for cluster-based development of MSMEs",
            "Cluster of at least 50 micro/small enterprises",
            "Diagnostic study, capacity building, infrastructure development support up to ₹15 crore",
            "Apply through state government or field office of MSME-DI",
            "https://dcmsme.gov.in",
        ),
        scheme(
            "msme-9",
            "ZED (Zero Defect Zero Effect) Certification",
            "Quality certification scheme for MSMEs",
            "All MSMEs",
            "80% subsidy on ZED certification cost (up to ₹80,000), improved competitiveness",
            "Register on ZED portal and engage certified consultants",
            "https://zed.msme.gov.in",
        ),
        scheme(
            "msme-10",
            "Technology and Quality Upgradation Support (TEQUP)",
            "Technology adoption and quality improvement support",
            "MSMEs in manufacturing sector",
            "Technology upgradation, quality certification, testing facility access",
            "Apply through Quality Council of India or MSME Technology Centers",
            "https://qcin.org",
        ),
    ]
}
